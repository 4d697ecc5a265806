use crate::db::categories::Categories;
use crate::db::db::Db;
use crate::db::gateway;
use crate::db::tags::Tags;
use crate::db::users::{User, Users};
use crate::libs::error::{BoardError, BoardResult};
use tracing::info;

fn check_username(username: &str) -> BoardResult<()> {
    if username.is_empty() {
        return Err(BoardError::validation("username must not be empty"));
    }
    Ok(())
}

fn check_email(email: &str) -> BoardResult<()> {
    if !email.contains('@') {
        return Err(BoardError::validation(format!("`{email}` is not an email address")));
    }
    Ok(())
}

/// Username and email belong to one account each. `except` is the account
/// being edited, which may keep its own values.
fn ensure_unclaimed(users: &Users<'_>, username: Option<&str>, email: Option<&str>, except: Option<i64>) -> BoardResult<()> {
    if let Some(username) = username {
        if users.get_by_username(username)?.is_some_and(|u| Some(u.id) != except) {
            return Err(BoardError::validation(format!("username `{username}` is taken")));
        }
    }
    if let Some(email) = email {
        if users.get_by_email(email)?.is_some_and(|u| Some(u.id) != except) {
            return Err(BoardError::validation(format!("email `{email}` is already registered")));
        }
    }
    Ok(())
}

/// Registers a user together with the default board columns and tags.
pub fn signup(db: &mut Db, username: &str, email: &str) -> BoardResult<User> {
    let username = username.trim();
    let email = email.trim();
    check_username(username)?;
    check_email(email)?;

    let user = gateway::run_in_transaction(&mut db.conn, |tx| {
        let users = Users::new(tx);
        ensure_unclaimed(&users, Some(username), Some(email), None)?;
        let id = users.create(username, email)?;
        Categories::new(tx).create_defaults(id)?;
        Tags::new(tx).create_defaults(id)?;
        users.require(id)
    })?;

    info!(user_id = user.id, username = %user.username, "user signed up");
    Ok(user)
}

/// Renames a user or changes their email. The id stays the same.
pub fn update_user(db: &mut Db, id: i64, username: Option<&str>, email: Option<&str>) -> BoardResult<User> {
    let username = username.map(str::trim);
    let email = email.map(str::trim);
    if let Some(username) = username {
        check_username(username)?;
    }
    if let Some(email) = email {
        check_email(email)?;
    }

    let user = gateway::run_in_transaction(&mut db.conn, |tx| {
        let users = Users::new(tx);
        users.require(id)?;
        ensure_unclaimed(&users, username, email, Some(id))?;
        users.update(id, username, email)?;
        users.require(id)
    })?;

    info!(user_id = user.id, username = %user.username, "user updated");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::categories::DEFAULT_CATEGORIES;
    use crate::db::tags::DEFAULT_TAGS;

    #[test]
    fn signup_seeds_board() {
        let mut db = Db::in_memory().unwrap();
        let user = signup(&mut db, "ada", "ada@example.com").unwrap();

        let categories = Categories::new(&db.conn).list(user.id).unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
        assert!(categories.iter().all(|c| c.project_id.is_none()));
        assert_eq!(Tags::new(&db.conn).list(user.id).unwrap().len(), DEFAULT_TAGS.len());
    }

    #[test]
    fn signup_rejects_bad_input() {
        let mut db = Db::in_memory().unwrap();
        assert!(matches!(signup(&mut db, "", "a@b.c"), Err(BoardError::ValidationFailure(_))));
        assert!(matches!(signup(&mut db, "bob", "nope"), Err(BoardError::ValidationFailure(_))));

        signup(&mut db, "bob", "bob@example.com").unwrap();
        assert!(matches!(
            signup(&mut db, "bob", "other@example.com"),
            Err(BoardError::ValidationFailure(_))
        ));
        assert!(matches!(
            signup(&mut db, "rob", "bob@example.com"),
            Err(BoardError::ValidationFailure(_))
        ));
    }

    #[test]
    fn update_user_keeps_own_values() {
        let mut db = Db::in_memory().unwrap();
        let bob = signup(&mut db, "bob", "bob@example.com").unwrap();

        let same = update_user(&mut db, bob.id, Some("bob"), Some("bob@example.com")).unwrap();
        assert_eq!(same, bob);

        let renamed = update_user(&mut db, bob.id, Some(" robert "), None).unwrap();
        assert_eq!(renamed.username, "robert");
        assert_eq!(renamed.email, "bob@example.com");
        assert!(matches!(update_user(&mut db, bob.id, None, Some("nope")), Err(BoardError::ValidationFailure(_))));
        assert!(matches!(update_user(&mut db, 99, Some("ghost"), None), Err(BoardError::NotFound { .. })));
    }
}
