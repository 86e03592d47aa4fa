use super::*;

impl<'a> SubscriptionRepo for DbReadOnly<'a> {
    fn create_subscription(&self, _subscription: &AirportSubscription) -> Result<()> {
        unreachable!();
    }
    fn update_subscription(&self, _subscription: &AirportSubscription) -> Result<()> {
        unreachable!();
    }

    fn get_subscription(&self, id: &Id) -> Result<AirportSubscription> {
        get_subscription(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_subscription_by_airport(
        &self,
        airport_id: &Id,
    ) -> Result<Option<AirportSubscription>> {
        try_get_subscription_by_airport(&mut self.conn.borrow_mut(), airport_id)
    }
    fn all_subscriptions(&self) -> Result<Vec<AirportSubscription>> {
        all_subscriptions(&mut self.conn.borrow_mut())
    }
}

impl<'a> SubscriptionRepo for DbReadWrite<'a> {
    fn create_subscription(&self, subscription: &AirportSubscription) -> Result<()> {
        create_subscription(&mut self.conn.borrow_mut(), subscription)
    }
    fn update_subscription(&self, subscription: &AirportSubscription) -> Result<()> {
        update_subscription(&mut self.conn.borrow_mut(), subscription)
    }

    fn get_subscription(&self, id: &Id) -> Result<AirportSubscription> {
        get_subscription(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_subscription_by_airport(
        &self,
        airport_id: &Id,
    ) -> Result<Option<AirportSubscription>> {
        try_get_subscription_by_airport(&mut self.conn.borrow_mut(), airport_id)
    }
    fn all_subscriptions(&self) -> Result<Vec<AirportSubscription>> {
        all_subscriptions(&mut self.conn.borrow_mut())
    }
}

impl<'a> SubscriptionRepo for DbConnection<'a> {
    fn create_subscription(&self, subscription: &AirportSubscription) -> Result<()> {
        create_subscription(&mut self.conn.borrow_mut(), subscription)
    }
    fn update_subscription(&self, subscription: &AirportSubscription) -> Result<()> {
        update_subscription(&mut self.conn.borrow_mut(), subscription)
    }

    fn get_subscription(&self, id: &Id) -> Result<AirportSubscription> {
        get_subscription(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_subscription_by_airport(
        &self,
        airport_id: &Id,
    ) -> Result<Option<AirportSubscription>> {
        try_get_subscription_by_airport(&mut self.conn.borrow_mut(), airport_id)
    }
    fn all_subscriptions(&self) -> Result<Vec<AirportSubscription>> {
        all_subscriptions(&mut self.conn.borrow_mut())
    }
}

fn load_subscription(entity: models::SubscriptionEntity) -> Result<AirportSubscription> {
    let models::SubscriptionEntity {
        id,
        airport_id,
        plan,
        start_at,
        expire_at,
        max_employees,
        status,
    } = entity;
    Ok(AirportSubscription {
        id: id.into(),
        airport_id: airport_id.into(),
        plan: parse_stored(&plan, "subscription plan")?,
        start_at: Timestamp::from_secs(start_at),
        expire_at: Timestamp::from_secs(expire_at),
        max_employees: max_employees as u32,
        status: parse_stored(&status, "subscription status")?,
    })
}

fn create_subscription(
    conn: &mut SqliteConnection,
    subscription: &AirportSubscription,
) -> Result<()> {
    let new_subscription = models::NewSubscription::from(subscription);
    diesel::insert_into(schema::subscriptions::table)
        .values(&new_subscription)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_subscription(
    conn: &mut SqliteConnection,
    subscription: &AirportSubscription,
) -> Result<()> {
    use schema::subscriptions::dsl;
    let new_subscription = models::NewSubscription::from(subscription);
    diesel::update(dsl::subscriptions.filter(dsl::id.eq(new_subscription.id)))
        .set(&new_subscription)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_subscription(conn: &mut SqliteConnection, id: &Id) -> Result<AirportSubscription> {
    use schema::subscriptions::dsl;
    load_subscription(
        dsl::subscriptions
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::SubscriptionEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

// Active rows win over suspended ones; among those the subscription
// that expires last counts, i.e. renewals supersede the period they
// extend.
fn try_get_subscription_by_airport(
    conn: &mut SqliteConnection,
    airport_id: &Id,
) -> Result<Option<AirportSubscription>> {
    use schema::subscriptions::dsl;
    dsl::subscriptions
        .filter(dsl::airport_id.eq(airport_id.as_str()))
        .order_by((
            dsl::status
                .eq(SubscriptionStatus::Active.to_string())
                .desc(),
            dsl::expire_at.desc(),
        ))
        .first::<models::SubscriptionEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_subscription)
        .transpose()
}

fn all_subscriptions(conn: &mut SqliteConnection) -> Result<Vec<AirportSubscription>> {
    use schema::subscriptions::dsl;
    dsl::subscriptions
        .load::<models::SubscriptionEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_subscription)
        .collect()
}
