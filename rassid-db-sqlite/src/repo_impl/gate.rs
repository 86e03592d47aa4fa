use super::*;

impl<'a> GateRepo for DbReadOnly<'a> {
    fn create_gate_assignment(&self, _assignment: &GateAssignment) -> Result<()> {
        unreachable!();
    }
    fn update_gate_assignment(&self, _assignment: &GateAssignment) -> Result<()> {
        unreachable!();
    }

    fn current_gate_of_flight(&self, flight_id: &Id) -> Result<Option<GateAssignment>> {
        current_gate_of_flight(&mut self.conn.borrow_mut(), flight_id)
    }
    fn gate_history_of_flight(&self, flight_id: &Id) -> Result<Vec<GateAssignment>> {
        gate_history_of_flight(&mut self.conn.borrow_mut(), flight_id)
    }
}

impl<'a> GateRepo for DbReadWrite<'a> {
    fn create_gate_assignment(&self, assignment: &GateAssignment) -> Result<()> {
        create_gate_assignment(&mut self.conn.borrow_mut(), assignment)
    }
    fn update_gate_assignment(&self, assignment: &GateAssignment) -> Result<()> {
        update_gate_assignment(&mut self.conn.borrow_mut(), assignment)
    }

    fn current_gate_of_flight(&self, flight_id: &Id) -> Result<Option<GateAssignment>> {
        current_gate_of_flight(&mut self.conn.borrow_mut(), flight_id)
    }
    fn gate_history_of_flight(&self, flight_id: &Id) -> Result<Vec<GateAssignment>> {
        gate_history_of_flight(&mut self.conn.borrow_mut(), flight_id)
    }
}

impl<'a> GateRepo for DbConnection<'a> {
    fn create_gate_assignment(&self, assignment: &GateAssignment) -> Result<()> {
        create_gate_assignment(&mut self.conn.borrow_mut(), assignment)
    }
    fn update_gate_assignment(&self, assignment: &GateAssignment) -> Result<()> {
        update_gate_assignment(&mut self.conn.borrow_mut(), assignment)
    }

    fn current_gate_of_flight(&self, flight_id: &Id) -> Result<Option<GateAssignment>> {
        current_gate_of_flight(&mut self.conn.borrow_mut(), flight_id)
    }
    fn gate_history_of_flight(&self, flight_id: &Id) -> Result<Vec<GateAssignment>> {
        gate_history_of_flight(&mut self.conn.borrow_mut(), flight_id)
    }
}

fn load_gate_assignment(entity: models::GateAssignmentEntity) -> GateAssignment {
    let models::GateAssignmentEntity {
        id,
        flight_id,
        gate,
        terminal,
        boarding_open_at,
        boarding_close_at,
        assigned_at,
        released_at,
    } = entity;
    GateAssignment {
        id: id.into(),
        flight_id: flight_id.into(),
        gate,
        terminal,
        boarding_open_at: Timestamp::from_secs(boarding_open_at),
        boarding_close_at: Timestamp::from_secs(boarding_close_at),
        assigned_at: Timestamp::from_secs(assigned_at),
        released_at: released_at.map(Timestamp::from_secs),
    }
}

fn create_gate_assignment(conn: &mut SqliteConnection, assignment: &GateAssignment) -> Result<()> {
    let new_assignment = models::NewGateAssignment::from(assignment);
    diesel::insert_into(schema::gate_assignments::table)
        .values(&new_assignment)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_gate_assignment(conn: &mut SqliteConnection, assignment: &GateAssignment) -> Result<()> {
    use schema::gate_assignments::dsl;
    let new_assignment = models::NewGateAssignment::from(assignment);
    diesel::update(dsl::gate_assignments.filter(dsl::id.eq(new_assignment.id)))
        .set(&new_assignment)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn current_gate_of_flight(
    conn: &mut SqliteConnection,
    flight_id: &Id,
) -> Result<Option<GateAssignment>> {
    use schema::gate_assignments::dsl;
    Ok(dsl::gate_assignments
        .filter(dsl::flight_id.eq(flight_id.as_str()))
        .filter(dsl::released_at.is_null())
        .order_by(dsl::assigned_at.desc())
        .first::<models::GateAssignmentEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_gate_assignment))
}

fn gate_history_of_flight(
    conn: &mut SqliteConnection,
    flight_id: &Id,
) -> Result<Vec<GateAssignment>> {
    use schema::gate_assignments::dsl;
    Ok(dsl::gate_assignments
        .filter(dsl::flight_id.eq(flight_id.as_str()))
        .order_by(dsl::assigned_at.asc())
        .load::<models::GateAssignmentEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_gate_assignment)
        .collect())
}
