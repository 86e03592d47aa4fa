use super::*;

impl<'a> PaymentRepo for DbReadOnly<'a> {
    fn create_payment(&self, _payment: &PaymentRecord) -> Result<()> {
        unreachable!();
    }
    fn payments_of_request(&self, request_id: &Id) -> Result<Vec<PaymentRecord>> {
        payments_of_request(&mut self.conn.borrow_mut(), request_id)
    }
}

impl<'a> PaymentRepo for DbReadWrite<'a> {
    fn create_payment(&self, payment: &PaymentRecord) -> Result<()> {
        create_payment(&mut self.conn.borrow_mut(), payment)
    }
    fn payments_of_request(&self, request_id: &Id) -> Result<Vec<PaymentRecord>> {
        payments_of_request(&mut self.conn.borrow_mut(), request_id)
    }
}

impl<'a> PaymentRepo for DbConnection<'a> {
    fn create_payment(&self, payment: &PaymentRecord) -> Result<()> {
        create_payment(&mut self.conn.borrow_mut(), payment)
    }
    fn payments_of_request(&self, request_id: &Id) -> Result<Vec<PaymentRecord>> {
        payments_of_request(&mut self.conn.borrow_mut(), request_id)
    }
}

fn load_payment(entity: models::PaymentEntity) -> Result<PaymentRecord> {
    let models::PaymentEntity {
        id,
        request_id,
        plan,
        amount_usd_cents,
        provider_session,
        paid_at,
    } = entity;
    Ok(PaymentRecord {
        id: id.into(),
        request_id: request_id.into(),
        plan: parse_stored(&plan, "subscription plan")?,
        amount_usd_cents,
        provider_session,
        paid_at: Timestamp::from_secs(paid_at),
    })
}

fn create_payment(conn: &mut SqliteConnection, payment: &PaymentRecord) -> Result<()> {
    let new_payment = models::NewPayment::from(payment);
    diesel::insert_into(schema::payments::table)
        .values(&new_payment)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn payments_of_request(conn: &mut SqliteConnection, request_id: &Id) -> Result<Vec<PaymentRecord>> {
    use schema::payments::dsl;
    dsl::payments
        .filter(dsl::request_id.eq(request_id.as_str()))
        .order_by(dsl::paid_at.asc())
        .load::<models::PaymentEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_payment)
        .collect()
}
