use super::*;

/// First account of a fresh deployment, created from the command line.
pub fn create_platform_admin(
    connections: &sqlite::Connections,
    email: &str,
    password: &str,
) -> Result<User> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::create_platform_admin(conn, email, password).map_err(|err| {
            warn!("Unable to create a platform admin: {}", err);
            err
        })
    })?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn bootstrap_the_first_admin_account() {
        let fixture = BackendFixture::new();
        let admin =
            super::create_platform_admin(&fixture.db_connections, "root@rassid.sa", "secret1")
                .unwrap();
        assert_eq!(admin.role, Role::PlatformAdmin);
        assert!(admin.airport_id.is_none());

        assert!(matches!(
            super::create_platform_admin(&fixture.db_connections, "root@rassid.sa", "other"),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::UserExists
            )))
        ));
    }
}
