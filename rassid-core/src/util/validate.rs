use lazy_static::lazy_static;
use regex::Regex;

pub use fast_chemail::is_valid_email;

lazy_static! {
    // Saudi mobile numbers, either international (+9665XXXXXXXX)
    // or national (05XXXXXXXX) notation.
    static ref SAUDI_MOBILE: Regex = Regex::new(r"^(\+9665\d{8}|05\d{8})$").unwrap();
}

pub fn is_valid_saudi_mobile(phone: &str) -> bool {
    SAUDI_MOBILE.is_match(phone)
}
