pub use rassid_entities::{
    airport::*, contact::*, email::*, flight::*, gate::*, id::*, notification::*, passenger::*,
    password::*, payment::*, request::*, subscription::*, ticket::*, time::*, user::*,
};
