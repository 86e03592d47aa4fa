use super::*;

impl<'a> FlightImportLogRepo for DbReadOnly<'a> {
    fn create_flight_import_log(&self, _log: &FlightImportLog) -> Result<()> {
        unreachable!();
    }
    fn last_flight_import_log(&self) -> Result<Option<FlightImportLog>> {
        last_flight_import_log(&mut self.conn.borrow_mut())
    }
}

impl<'a> FlightImportLogRepo for DbReadWrite<'a> {
    fn create_flight_import_log(&self, log: &FlightImportLog) -> Result<()> {
        create_flight_import_log(&mut self.conn.borrow_mut(), log)
    }
    fn last_flight_import_log(&self) -> Result<Option<FlightImportLog>> {
        last_flight_import_log(&mut self.conn.borrow_mut())
    }
}

impl<'a> FlightImportLogRepo for DbConnection<'a> {
    fn create_flight_import_log(&self, log: &FlightImportLog) -> Result<()> {
        create_flight_import_log(&mut self.conn.borrow_mut(), log)
    }
    fn last_flight_import_log(&self) -> Result<Option<FlightImportLog>> {
        last_flight_import_log(&mut self.conn.borrow_mut())
    }
}

fn load_flight_import_log(entity: models::FlightImportLogEntity) -> Result<FlightImportLog> {
    let models::FlightImportLogEntity {
        id,
        provider,
        airport_code,
        raw_payload,
        imported_count,
        fetched_at,
    } = entity;
    Ok(FlightImportLog {
        id: id.into(),
        provider,
        airport_code: airport_code
            .map(|code| parse_stored(&code, "airport code"))
            .transpose()?,
        raw_payload,
        imported_count: imported_count as u32,
        fetched_at: Timestamp::from_secs(fetched_at),
    })
}

fn create_flight_import_log(conn: &mut SqliteConnection, log: &FlightImportLog) -> Result<()> {
    let new_log = models::NewFlightImportLog::from(log);
    diesel::insert_into(schema::flight_import_logs::table)
        .values(&new_log)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn last_flight_import_log(conn: &mut SqliteConnection) -> Result<Option<FlightImportLog>> {
    use schema::flight_import_logs::dsl;
    dsl::flight_import_logs
        .order_by(dsl::fetched_at.desc())
        .first::<models::FlightImportLogEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_flight_import_log)
        .transpose()
}
