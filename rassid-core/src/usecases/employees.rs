use lazy_static::lazy_static;
use passwords::PasswordGenerator;

use super::prelude::*;
use crate::{usecases, util::validate};

lazy_static! {
    static ref PW_GEN: PasswordGenerator = PasswordGenerator {
        length: 8,
        numbers: true,
        lowercase_letters: true,
        uppercase_letters: true,
        symbols: true,
        spaces: false,
        exclude_similar_characters: true,
        strict: false,
    };
}

pub(crate) fn generate_password() -> Result<String> {
    PW_GEN.generate_one().map_err(|_| Error::Password)
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub email: String,
    /// Generated when absent.
    pub password: Option<String>,
    pub role: Role,
}

/// Adds a staff account to the admin's airport. Returns the account
/// and the generated clear text password, if one had to be generated.
pub fn add_employee<R>(repo: &R, admin: &User, new: NewEmployee) -> Result<(User, Option<String>)>
where
    R: UserRepo + SubscriptionRepo,
{
    usecases::authorize_role(admin, Role::AirportAdmin)?;
    let airport_id = admin_airport_id(admin)?;
    if !matches!(new.role, Role::Operator | Role::AirportAdmin) {
        return Err(Error::Forbidden);
    }

    let subscription = repo
        .try_get_subscription_by_airport(&airport_id)?
        .ok_or(Error::SubscriptionExpired)?;
    let employees = repo.count_users_by_airport(&airport_id)?;
    if employees >= subscription.max_employees as usize {
        return Err(Error::EmployeeLimit);
    }

    if !validate::is_valid_email(&new.email) {
        return Err(Error::EmailAddress);
    }
    let email = new.email.parse::<EmailAddress>()?;
    if repo.try_get_user_by_email(&email)?.is_some() {
        return Err(Error::UserExists);
    }

    let (password, generated) = match new.password {
        Some(password) => (password, None),
        None => {
            let password = generate_password()?;
            (password.clone(), Some(password))
        }
    };
    let user = User {
        id: Id::new(),
        email,
        password: password.parse::<Password>()?,
        role: new.role,
        airport_id: Some(airport_id),
        created_at: Timestamp::now(),
    };
    repo.create_user(&user)?;
    Ok((user, generated))
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub role: Option<Role>,
    pub password: Option<String>,
}

pub fn update_employee<R>(
    repo: &R,
    admin: &User,
    employee_id: &Id,
    update: EmployeeUpdate,
) -> Result<User>
where
    R: UserRepo,
{
    let mut employee = get_managed_employee(repo, admin, employee_id)?;
    if let Some(role) = update.role {
        if !matches!(role, Role::Operator | Role::AirportAdmin) {
            return Err(Error::Forbidden);
        }
        // Admins must not demote themselves out of their own airport.
        if employee.id == admin.id && role < admin.role {
            return Err(Error::OwnAccount);
        }
        employee.role = role;
    }
    if let Some(password) = update.password {
        employee.password = password.parse::<Password>()?;
    }
    repo.update_user(&employee)?;
    Ok(employee)
}

pub fn delete_employee<R>(repo: &R, admin: &User, employee_id: &Id) -> Result<()>
where
    R: UserRepo,
{
    let employee = get_managed_employee(repo, admin, employee_id)?;
    if employee.id == admin.id {
        return Err(Error::OwnAccount);
    }
    Ok(repo.delete_user(&employee.id)?)
}

pub fn list_employees<R>(repo: &R, admin: &User, airport_id: &Id) -> Result<Vec<User>>
where
    R: UserRepo,
{
    usecases::authorize_role(admin, Role::AirportAdmin)?;
    usecases::authorize_airport_member(admin, airport_id)?;
    let mut employees = repo.get_users_by_airport(airport_id)?;
    employees.sort_by(|a, b| a.email.as_str().cmp(b.email.as_str()));
    Ok(employees)
}

/// Bootstraps a cross-tenant admin account. Not reachable from the
/// web interface.
pub fn create_platform_admin<R>(repo: &R, email: &str, password: &str) -> Result<User>
where
    R: UserRepo,
{
    if !validate::is_valid_email(email) {
        return Err(Error::EmailAddress);
    }
    let email = email.parse::<EmailAddress>()?;
    if repo.try_get_user_by_email(&email)?.is_some() {
        return Err(Error::UserExists);
    }
    let user = User {
        id: Id::new(),
        email,
        password: password.parse::<Password>()?,
        role: Role::PlatformAdmin,
        airport_id: None,
        created_at: Timestamp::now(),
    };
    repo.create_user(&user)?;
    Ok(user)
}

fn admin_airport_id(admin: &User) -> Result<Id> {
    admin.airport_id.clone().ok_or(Error::Forbidden)
}

fn get_managed_employee<R>(repo: &R, admin: &User, employee_id: &Id) -> Result<User>
where
    R: UserRepo,
{
    usecases::authorize_role(admin, Role::AirportAdmin)?;
    let employee = repo.get_user(employee_id)?;
    match &employee.airport_id {
        Some(airport_id) => usecases::authorize_airport_member(admin, airport_id)?,
        // platform accounts are out of reach for airport admins
        None => usecases::authorize_role(admin, Role::PlatformAdmin)?,
    }
    Ok(employee)
}
