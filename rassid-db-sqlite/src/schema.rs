///////////////////////////////////////////////////////////////////////
// Accounts
///////////////////////////////////////////////////////////////////////

table! {
    users (id) {
        id -> Text,
        email -> Text,
        password -> Text,
        role -> SmallInt,
        airport_id -> Nullable<Text>,
        created_at -> BigInt,
    }
}

joinable!(users -> airports (airport_id));

///////////////////////////////////////////////////////////////////////
// Airports and subscriptions
///////////////////////////////////////////////////////////////////////

table! {
    airports (id) {
        id -> Text,
        name -> Text,
        code -> Text,
        city -> Text,
        country -> Text,
        created_at -> BigInt,
    }
}

table! {
    subscription_requests (id) {
        id -> Text,
        airport_name -> Text,
        airport_code -> Text,
        city -> Text,
        country -> Text,
        contact_email -> Text,
        contact_phone -> Text,
        plan -> Text,
        license_file -> Text,
        commercial_record_file -> Nullable<Text>,
        status -> Text,
        rejection_reason -> Nullable<Text>,
        created_at -> BigInt,
    }
}

table! {
    subscriptions (id) {
        id -> Text,
        airport_id -> Text,
        plan -> Text,
        start_at -> BigInt,
        expire_at -> BigInt,
        max_employees -> BigInt,
        status -> Text,
    }
}

joinable!(subscriptions -> airports (airport_id));

table! {
    payments (id) {
        id -> Text,
        request_id -> Text,
        plan -> Text,
        amount_usd_cents -> BigInt,
        provider_session -> Text,
        paid_at -> BigInt,
    }
}

joinable!(payments -> subscription_requests (request_id));

///////////////////////////////////////////////////////////////////////
// Flights
///////////////////////////////////////////////////////////////////////

table! {
    flights (id) {
        id -> Text,
        flight_number -> Text,
        airline_code -> Text,
        status -> Text,
        scheduled_departure -> BigInt,
        scheduled_arrival -> BigInt,
        origin_airport_id -> Text,
        destination_airport_id -> Text,
        protected -> Bool,
        updated_at -> BigInt,
    }
}

table! {
    flight_status_changes (id) {
        id -> Text,
        flight_id -> Text,
        old_status -> Text,
        new_status -> Text,
        changed_at -> BigInt,
    }
}

joinable!(flight_status_changes -> flights (flight_id));

table! {
    flight_import_logs (id) {
        id -> Text,
        provider -> Text,
        airport_code -> Nullable<Text>,
        raw_payload -> Text,
        imported_count -> BigInt,
        fetched_at -> BigInt,
    }
}

table! {
    gate_assignments (id) {
        id -> Text,
        flight_id -> Text,
        gate -> Text,
        terminal -> Text,
        boarding_open_at -> BigInt,
        boarding_close_at -> BigInt,
        assigned_at -> BigInt,
        // NULL while the assignment is the current one
        released_at -> Nullable<BigInt>,
    }
}

joinable!(gate_assignments -> flights (flight_id));

///////////////////////////////////////////////////////////////////////
// Passengers
///////////////////////////////////////////////////////////////////////

table! {
    passengers (id) {
        id -> Text,
        full_name -> Text,
        email -> Text,
        phone -> Nullable<Text>,
        language -> Text,
        tracking_token -> Text,
    }
}

table! {
    bookings (id) {
        id -> Text,
        passenger_id -> Text,
        flight_id -> Text,
        seat -> Nullable<Text>,
        booking_ref -> Text,
        created_at -> BigInt,
    }
}

joinable!(bookings -> passengers (passenger_id));
joinable!(bookings -> flights (flight_id));

///////////////////////////////////////////////////////////////////////
// Support tickets
///////////////////////////////////////////////////////////////////////

table! {
    tickets (id) {
        id -> Text,
        airport_id -> Text,
        created_by -> Text,
        assigned_to -> Nullable<Text>,
        title -> Text,
        description -> Text,
        category -> Text,
        priority -> Text,
        status -> Text,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

joinable!(tickets -> airports (airport_id));

table! {
    ticket_comments (id) {
        id -> Text,
        ticket_id -> Text,
        author_id -> Text,
        body -> Text,
        created_at -> BigInt,
    }
}

joinable!(ticket_comments -> tickets (ticket_id));

///////////////////////////////////////////////////////////////////////
// Notifications
///////////////////////////////////////////////////////////////////////

table! {
    sent_notifications (booking_id, event_key) {
        booking_id -> Text,
        event_key -> Text,
        sent_at -> BigInt,
    }
}

joinable!(sent_notifications -> bookings (booking_id));

table! {
    email_log (id) {
        id -> Text,
        recipient -> Text,
        subject -> Text,
        status -> Text,
        error -> Nullable<Text>,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Contact messages
///////////////////////////////////////////////////////////////////////

table! {
    contact_messages (id) {
        id -> Text,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        subject -> Text,
        message -> Text,
        resolved -> Bool,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////

allow_tables_to_appear_in_same_query!(
    airports,
    bookings,
    contact_messages,
    email_log,
    flights,
    flight_import_logs,
    flight_status_changes,
    gate_assignments,
    passengers,
    payments,
    sent_notifications,
    subscription_requests,
    subscriptions,
    tickets,
    ticket_comments,
    users,
);
