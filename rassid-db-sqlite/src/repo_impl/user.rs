use super::*;

impl<'a> UserRepo for DbReadOnly<'a> {
    fn create_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }
    fn update_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }
    fn delete_user(&self, _id: &Id) -> Result<()> {
        unreachable!();
    }

    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
    fn get_user(&self, id: &Id) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User> {
        get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }

    fn get_users_by_airport(&self, airport_id: &Id) -> Result<Vec<User>> {
        get_users_by_airport(&mut self.conn.borrow_mut(), airport_id)
    }
    fn get_users_by_role(&self, role: Role) -> Result<Vec<User>> {
        get_users_by_role(&mut self.conn.borrow_mut(), role)
    }
    fn count_users_by_airport(&self, airport_id: &Id) -> Result<usize> {
        count_users_by_airport(&mut self.conn.borrow_mut(), airport_id)
    }
}

impl<'a> UserRepo for DbReadWrite<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }
    fn delete_user(&self, id: &Id) -> Result<()> {
        delete_user(&mut self.conn.borrow_mut(), id)
    }

    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
    fn get_user(&self, id: &Id) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User> {
        get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }

    fn get_users_by_airport(&self, airport_id: &Id) -> Result<Vec<User>> {
        get_users_by_airport(&mut self.conn.borrow_mut(), airport_id)
    }
    fn get_users_by_role(&self, role: Role) -> Result<Vec<User>> {
        get_users_by_role(&mut self.conn.borrow_mut(), role)
    }
    fn count_users_by_airport(&self, airport_id: &Id) -> Result<usize> {
        count_users_by_airport(&mut self.conn.borrow_mut(), airport_id)
    }
}

impl<'a> UserRepo for DbConnection<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }
    fn delete_user(&self, id: &Id) -> Result<()> {
        delete_user(&mut self.conn.borrow_mut(), id)
    }

    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
    fn get_user(&self, id: &Id) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User> {
        get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }

    fn get_users_by_airport(&self, airport_id: &Id) -> Result<Vec<User>> {
        get_users_by_airport(&mut self.conn.borrow_mut(), airport_id)
    }
    fn get_users_by_role(&self, role: Role) -> Result<Vec<User>> {
        get_users_by_role(&mut self.conn.borrow_mut(), role)
    }
    fn count_users_by_airport(&self, airport_id: &Id) -> Result<usize> {
        count_users_by_airport(&mut self.conn.borrow_mut(), airport_id)
    }
}

fn load_user(entity: models::UserEntity) -> Result<User> {
    let models::UserEntity {
        id,
        email,
        password,
        role,
        airport_id,
        created_at,
    } = entity;
    Ok(User {
        id: id.into(),
        email: EmailAddress::new_unchecked(email),
        password: password.into(),
        role: load_role(role)?,
        airport_id: airport_id.map(Into::into),
        created_at: Timestamp::from_secs(created_at),
    })
}

fn create_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    let new_user = models::NewUser::from(u);
    diesel::insert_into(schema::users::table)
        .values(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    use schema::users::dsl;
    let new_user = models::NewUser::from(u);
    diesel::update(dsl::users.filter(dsl::id.eq(new_user.id)))
        .set(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_user(conn: &mut SqliteConnection, id: &Id) -> Result<()> {
    use schema::users::dsl;
    diesel::delete(dsl::users.filter(dsl::id.eq(id.as_str())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn all_users(conn: &mut SqliteConnection) -> Result<Vec<User>> {
    use schema::users::dsl;
    dsl::users
        .load::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_user)
        .collect()
}

fn get_user(conn: &mut SqliteConnection, id: &Id) -> Result<User> {
    use schema::users::dsl;
    load_user(
        dsl::users
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::UserEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn get_user_by_email(conn: &mut SqliteConnection, email: &EmailAddress) -> Result<User> {
    use schema::users::dsl;
    load_user(
        dsl::users
            .filter(dsl::email.eq(email.as_str()))
            .first::<models::UserEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn try_get_user_by_email(
    conn: &mut SqliteConnection,
    email: &EmailAddress,
) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::email.eq(email.as_str()))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_user)
        .transpose()
}

fn get_users_by_airport(conn: &mut SqliteConnection, airport_id: &Id) -> Result<Vec<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::airport_id.eq(airport_id.as_str()))
        .load::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_user)
        .collect()
}

fn get_users_by_role(conn: &mut SqliteConnection, role: Role) -> Result<Vec<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::role.eq(role.to_i16().expect("user role primitive")))
        .load::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_user)
        .collect()
}

fn count_users_by_airport(conn: &mut SqliteConnection, airport_id: &Id) -> Result<usize> {
    use schema::users::dsl;
    Ok(dsl::users
        .filter(dsl::airport_id.eq(airport_id.as_str()))
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}
