use super::*;

impl<'a> SubscriptionRequestRepo for DbReadOnly<'a> {
    fn create_subscription_request(&self, _request: &SubscriptionRequest) -> Result<()> {
        unreachable!();
    }
    fn update_subscription_request(&self, _request: &SubscriptionRequest) -> Result<()> {
        unreachable!();
    }

    fn get_subscription_request(&self, id: &Id) -> Result<SubscriptionRequest> {
        get_subscription_request(&mut self.conn.borrow_mut(), id)
    }
    fn all_subscription_requests(&self) -> Result<Vec<SubscriptionRequest>> {
        all_subscription_requests(&mut self.conn.borrow_mut())
    }
    fn subscription_requests_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<SubscriptionRequest>> {
        subscription_requests_by_status(&mut self.conn.borrow_mut(), status)
    }
}

impl<'a> SubscriptionRequestRepo for DbReadWrite<'a> {
    fn create_subscription_request(&self, request: &SubscriptionRequest) -> Result<()> {
        create_subscription_request(&mut self.conn.borrow_mut(), request)
    }
    fn update_subscription_request(&self, request: &SubscriptionRequest) -> Result<()> {
        update_subscription_request(&mut self.conn.borrow_mut(), request)
    }

    fn get_subscription_request(&self, id: &Id) -> Result<SubscriptionRequest> {
        get_subscription_request(&mut self.conn.borrow_mut(), id)
    }
    fn all_subscription_requests(&self) -> Result<Vec<SubscriptionRequest>> {
        all_subscription_requests(&mut self.conn.borrow_mut())
    }
    fn subscription_requests_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<SubscriptionRequest>> {
        subscription_requests_by_status(&mut self.conn.borrow_mut(), status)
    }
}

impl<'a> SubscriptionRequestRepo for DbConnection<'a> {
    fn create_subscription_request(&self, request: &SubscriptionRequest) -> Result<()> {
        create_subscription_request(&mut self.conn.borrow_mut(), request)
    }
    fn update_subscription_request(&self, request: &SubscriptionRequest) -> Result<()> {
        update_subscription_request(&mut self.conn.borrow_mut(), request)
    }

    fn get_subscription_request(&self, id: &Id) -> Result<SubscriptionRequest> {
        get_subscription_request(&mut self.conn.borrow_mut(), id)
    }
    fn all_subscription_requests(&self) -> Result<Vec<SubscriptionRequest>> {
        all_subscription_requests(&mut self.conn.borrow_mut())
    }
    fn subscription_requests_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<SubscriptionRequest>> {
        subscription_requests_by_status(&mut self.conn.borrow_mut(), status)
    }
}

fn load_subscription_request(
    entity: models::SubscriptionRequestEntity,
) -> Result<SubscriptionRequest> {
    let models::SubscriptionRequestEntity {
        id,
        airport_name,
        airport_code,
        city,
        country,
        contact_email,
        contact_phone,
        plan,
        license_file,
        commercial_record_file,
        status,
        rejection_reason,
        created_at,
    } = entity;
    Ok(SubscriptionRequest {
        id: id.into(),
        airport: PendingAirport {
            name: airport_name,
            code: parse_stored(&airport_code, "airport code")?,
            city,
            country,
        },
        contact_email: EmailAddress::new_unchecked(contact_email),
        contact_phone,
        plan: parse_stored(&plan, "subscription plan")?,
        license_file,
        commercial_record_file,
        status: parse_stored(&status, "request status")?,
        rejection_reason,
        created_at: Timestamp::from_secs(created_at),
    })
}

fn create_subscription_request(
    conn: &mut SqliteConnection,
    request: &SubscriptionRequest,
) -> Result<()> {
    let new_request = models::NewSubscriptionRequest::from(request);
    diesel::insert_into(schema::subscription_requests::table)
        .values(&new_request)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_subscription_request(
    conn: &mut SqliteConnection,
    request: &SubscriptionRequest,
) -> Result<()> {
    use schema::subscription_requests::dsl;
    let new_request = models::NewSubscriptionRequest::from(request);
    diesel::update(dsl::subscription_requests.filter(dsl::id.eq(new_request.id)))
        .set(&new_request)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_subscription_request(conn: &mut SqliteConnection, id: &Id) -> Result<SubscriptionRequest> {
    use schema::subscription_requests::dsl;
    load_subscription_request(
        dsl::subscription_requests
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::SubscriptionRequestEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn all_subscription_requests(conn: &mut SqliteConnection) -> Result<Vec<SubscriptionRequest>> {
    use schema::subscription_requests::dsl;
    dsl::subscription_requests
        .order_by(dsl::created_at.desc())
        .load::<models::SubscriptionRequestEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_subscription_request)
        .collect()
}

fn subscription_requests_by_status(
    conn: &mut SqliteConnection,
    status: RequestStatus,
) -> Result<Vec<SubscriptionRequest>> {
    use schema::subscription_requests::dsl;
    dsl::subscription_requests
        .filter(dsl::status.eq(status.to_string()))
        .order_by(dsl::created_at.desc())
        .load::<models::SubscriptionRequestEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_subscription_request)
        .collect()
}
