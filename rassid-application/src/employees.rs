use rassid_core::gateways::notify::{IssuedCredentials, NotificationEvent, NotificationGateway};

use super::*;

/// Adds a staff account to the admin's airport. If no password was
/// provided the generated one is mailed to the new employee.
pub fn add_employee(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    admin: &User,
    new: usecases::NewEmployee,
) -> Result<User> {
    let (employee, generated) = connections.exclusive()?.transaction(|conn| {
        usecases::add_employee(conn, admin, new).map_err(|err| {
            warn!("Unable to add an employee: {}", err);
            err
        })
    })?;

    if let Some(password) = generated {
        if let Err(err) = send_credentials(connections, notify, &employee, password) {
            error!(
                "Failed to mail the credentials of {}: {}",
                employee.email, err
            );
        }
    }
    Ok(employee)
}

fn send_credentials(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    employee: &User,
    password: String,
) -> Result<()> {
    let Some(airport_id) = &employee.airport_id else {
        return Ok(());
    };
    let airport = connections.shared()?.get_airport(airport_id)?;
    let credentials = IssuedCredentials {
        email: employee.email.clone(),
        password,
    };
    notifications::send_and_log(
        connections,
        notify,
        NotificationEvent::EmployeeInvited {
            airport: &airport,
            credentials: &credentials,
        },
    );
    Ok(())
}

pub fn update_employee(
    connections: &sqlite::Connections,
    admin: &User,
    employee_id: &Id,
    update: usecases::EmployeeUpdate,
) -> Result<User> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::update_employee(conn, admin, employee_id, update).map_err(|err| {
            warn!("Unable to update employee {}: {}", employee_id, err);
            err
        })
    })?)
}

pub fn delete_employee(
    connections: &sqlite::Connections,
    admin: &User,
    employee_id: &Id,
) -> Result<()> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::delete_employee(conn, admin, employee_id).map_err(|err| {
            warn!("Unable to delete employee {}: {}", employee_id, err);
            err
        })
    })?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn add(fixture: &BackendFixture, admin: &User, email: &str) -> super::Result<User> {
        let new = usecases::NewEmployee {
            email: email.into(),
            password: None,
            role: Role::Operator,
        };
        super::add_employee(&fixture.db_connections, &fixture.notify, admin, new)
    }

    #[test]
    fn new_employees_receive_their_credentials() {
        let fixture = BackendFixture::new();
        let (airport, admin) = fixture.default_tenant();

        let employee = add(&fixture, &admin, "ops@ruh.sa").unwrap();
        assert_eq!(employee.role, Role::Operator);
        assert_eq!(employee.airport_id.as_ref(), Some(&airport.id));
        assert_eq!(
            fixture.notify.events.borrow().as_slice(),
            &[NotificationType::CredentialsIssued]
        );

        let stored = fixture
            .db_connections
            .shared()
            .unwrap()
            .get_user(&employee.id)
            .unwrap();
        assert_eq!(stored.email, employee.email);
    }

    #[test]
    fn the_subscription_caps_the_headcount() {
        let fixture = BackendFixture::new();
        let (airport, admin) = fixture.default_tenant();
        let mut subscription = fixture
            .db_connections
            .shared()
            .unwrap()
            .try_get_subscription_by_airport(&airport.id)
            .unwrap()
            .unwrap();
        subscription.max_employees = 2;
        fixture
            .db_connections
            .exclusive()
            .unwrap()
            .update_subscription(&subscription)
            .unwrap();

        add(&fixture, &admin, "one@ruh.sa").unwrap();
        assert!(matches!(
            add(&fixture, &admin, "two@ruh.sa"),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::EmployeeLimit
            )))
        ));
        // the rejected account got no invitation either
        assert_eq!(fixture.notify.events.borrow().len(), 1);
    }

    #[test]
    fn admins_cannot_delete_themselves() {
        let fixture = BackendFixture::new();
        let (_, admin) = fixture.default_tenant();
        assert!(matches!(
            super::delete_employee(&fixture.db_connections, &admin, &admin.id),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::OwnAccount
            )))
        ));
    }

    #[test]
    fn password_resets_take_effect_immediately() {
        let fixture = BackendFixture::new();
        let (_, admin) = fixture.default_tenant();
        let employee = add(&fixture, &admin, "ops@ruh.sa").unwrap();

        let update = usecases::EmployeeUpdate {
            role: None,
            password: Some("fresh-secret".into()),
        };
        super::update_employee(&fixture.db_connections, &admin, &employee.id, update).unwrap();

        let login = fixture.db_connections.shared().unwrap();
        let user =
            usecases::login_with_email_and_password(&login, "ops@ruh.sa", "fresh-secret").unwrap();
        assert_eq!(user.id, employee.id);
    }
}
