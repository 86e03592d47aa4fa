use super::*;

pub fn comment_ticket(
    connections: &sqlite::Connections,
    author: &User,
    ticket_id: &Id,
    body: String,
) -> Result<TicketComment> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::comment_ticket(conn, author, ticket_id, body).map_err(|err| {
            warn!("Unable to comment on ticket {}: {}", ticket_id, err);
            err
        })
    })?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn closed_threads_stay_closed() {
        let fixture = BackendFixture::new();
        let (airport, admin) = fixture.default_tenant();
        let operator =
            fixture.create_user(Role::Operator, Some(&airport.id), "ops@ruh.sa", "secret1");
        let platform = fixture.create_user(Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let ticket = fixture.create_ticket(&operator);

        let comment = super::comment_ticket(
            &fixture.db_connections,
            &operator,
            &ticket.id,
            "still broken".into(),
        )
        .unwrap();
        assert_eq!(comment.ticket_id, ticket.id);

        flows::escalate_ticket(&fixture.db_connections, &fixture.notify, &admin, &ticket.id)
            .unwrap();
        flows::close_ticket(&fixture.db_connections, &platform, &ticket.id).unwrap();
        assert!(matches!(
            super::comment_ticket(
                &fixture.db_connections,
                &operator,
                &ticket.id,
                "too late".into(),
            ),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::TicketClosed
            )))
        ));

        let comments = fixture
            .db_connections
            .shared()
            .unwrap()
            .comments_of_ticket(&ticket.id)
            .unwrap();
        assert_eq!(comments.len(), 1);
    }
}
