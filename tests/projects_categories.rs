#[cfg(test)]
mod tests {
    use taskboard::db::categories::Categories;
    use taskboard::db::db::Db;
    use taskboard::db::projects::Projects;
    use taskboard::db::tags::Tags;
    use taskboard::db::tasks::Tasks;
    use taskboard::db::users::Users;
    use taskboard::libs::account;
    use taskboard::libs::error::{BoardError, EntityKind};
    use taskboard::libs::scope::Identity;
    use taskboard::libs::task::{BoardStatus, NewTask};
    use taskboard::libs::task_service::TaskService;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct AccountContext {
        temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for AccountContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("board.db")).unwrap();
            AccountContext { temp_dir, db }
        }
    }

    #[test_context(AccountContext)]
    #[test]
    fn test_signup_creates_default_board(ctx: &mut AccountContext) {
        let user = account::signup(&mut ctx.db, "ada", "ada@example.com").unwrap();

        let stored = Users::new(&ctx.db.conn).get_by_username("ada").unwrap().unwrap();
        assert_eq!(stored, user);

        let categories = Categories::new(&ctx.db.conn).list(user.id).unwrap();
        let columns: Vec<(&str, BoardStatus)> = categories.iter().map(|c| (c.name.as_str(), c.status)).collect();
        assert_eq!(
            columns,
            vec![
                ("Open", BoardStatus::Open),
                ("In Progress", BoardStatus::InProgress),
                ("In Review", BoardStatus::Review),
                ("Complete", BoardStatus::Complete),
            ]
        );

        let tags = Tags::new(&ctx.db.conn).list(user.id).unwrap();
        let colors: Vec<(&str, &str)> = tags.iter().map(|t| (t.name.as_str(), t.color.as_str())).collect();
        assert_eq!(
            colors,
            vec![
                ("Enhancement", "#FF55EE"),
                ("Feature", "#5CFFBC"),
                ("Testing", "#6FCCF6"),
                ("UI/UX", "#8F6BED"),
            ]
        );
    }

    #[test_context(AccountContext)]
    #[test]
    fn test_duplicate_username_is_rejected(ctx: &mut AccountContext) {
        account::signup(&mut ctx.db, "ada", "ada@example.com").unwrap();
        let err = account::signup(&mut ctx.db, "ada", "other@example.com").unwrap_err();
        assert!(matches!(err, BoardError::ValidationFailure(_)));

        let err = account::signup(&mut ctx.db, "grace", "ada@example.com").unwrap_err();
        assert!(matches!(err, BoardError::ValidationFailure(_)));
        assert!(Users::new(&ctx.db.conn).get_by_username("grace").unwrap().is_none());
    }

    #[test_context(AccountContext)]
    #[test]
    fn test_user_update_keeps_username_and_email_unique(ctx: &mut AccountContext) {
        let ada = account::signup(&mut ctx.db, "ada", "ada@example.com").unwrap();
        let eve = account::signup(&mut ctx.db, "eve", "eve@example.com").unwrap();

        assert!(matches!(
            account::update_user(&mut ctx.db, eve.id, Some("ada"), None),
            Err(BoardError::ValidationFailure(_))
        ));
        assert!(matches!(
            account::update_user(&mut ctx.db, eve.id, None, Some("ada@example.com")),
            Err(BoardError::ValidationFailure(_))
        ));

        let updated = account::update_user(&mut ctx.db, eve.id, Some("eva"), Some("eva@example.com")).unwrap();
        assert_eq!(updated.id, eve.id);
        let users = Users::new(&ctx.db.conn);
        assert_eq!(users.get_by_email("eva@example.com").unwrap(), Some(updated));
        assert!(users.get_by_username("eve").unwrap().is_none());
        assert_eq!(users.get_by_email("ada@example.com").unwrap(), Some(ada));

        // the freed name can be claimed again
        account::signup(&mut ctx.db, "eve", "eve@example.com").unwrap();
    }

    #[test_context(AccountContext)]
    #[test]
    fn test_unbound_category_names_are_unique(ctx: &mut AccountContext) {
        let ada = account::signup(&mut ctx.db, "ada", "ada@example.com").unwrap();
        let eve = account::signup(&mut ctx.db, "eve", "eve@example.com").unwrap();
        let web = Projects::new(&ctx.db.conn).create(ada.id, "Web", None).unwrap();
        let categories = Categories::new(&ctx.db.conn);

        assert!(matches!(
            categories.create(ada.id, None, "Open", BoardStatus::Open),
            Err(BoardError::ValidationFailure(_))
        ));
        let opens = categories.list(ada.id).unwrap().iter().filter(|c| c.name == "Open").count();
        assert_eq!(opens, 1);

        // a project may shadow a shared column, once
        categories.create(ada.id, Some(web), "Open", BoardStatus::Open).unwrap();
        assert!(matches!(
            categories.create(ada.id, Some(web), "Open", BoardStatus::Open),
            Err(BoardError::ValidationFailure(_))
        ));

        let complete = categories.list(ada.id).unwrap().into_iter().find(|c| c.name == "Complete").unwrap();
        assert!(matches!(
            categories.update(ada.id, complete.id, Some("In Review"), None),
            Err(BoardError::ValidationFailure(_))
        ));
        categories.update(ada.id, complete.id, Some("Complete"), None).unwrap();

        // the schema enforces the same rule below the repository
        let raw = ctx.db.conn.execute(
            "INSERT INTO categories (user_id, name, status, created_at, updated_at)
             VALUES (?1, 'Open', 'open', '2024-01-01', '2024-01-01')",
            [ada.id],
        );
        assert!(raw.is_err());

        // names are per owner
        assert!(categories.list(eve.id).unwrap().iter().any(|c| c.name == "Open"));
    }

    #[test_context(AccountContext)]
    #[test]
    fn test_project_crud_is_owner_scoped(ctx: &mut AccountContext) {
        let ada = account::signup(&mut ctx.db, "ada", "ada@example.com").unwrap();
        let eve = account::signup(&mut ctx.db, "eve", "eve@example.com").unwrap();
        let projects = Projects::new(&ctx.db.conn);

        let id = projects.create(ada.id, "Website", None).unwrap();
        projects.update(ada.id, id, Some("Web"), Some("landing pages")).unwrap();
        let project = projects.get_by_id(ada.id, id).unwrap().unwrap();
        assert_eq!(project.name, "Web");
        assert_eq!(project.description.as_deref(), Some("landing pages"));

        assert!(projects.get_by_id(eve.id, id).unwrap().is_none());
        assert!(projects.list(eve.id).unwrap().is_empty());
        assert!(matches!(
            projects.update(eve.id, id, Some("Mine"), None),
            Err(BoardError::NotFound { entity: EntityKind::Project, .. })
        ));
        assert!(matches!(projects.delete(eve.id, id), Err(BoardError::NotFound { .. })));
        assert_eq!(projects.list(ada.id).unwrap().len(), 1);
    }

    #[test_context(AccountContext)]
    #[test]
    fn test_project_delete_cascades_tasks(ctx: &mut AccountContext) {
        let ada = account::signup(&mut ctx.db, "ada", "ada@example.com").unwrap();
        let project = Projects::new(&ctx.db.conn).create(ada.id, "Website", None).unwrap();
        let open = Categories::new(&ctx.db.conn).list(ada.id).unwrap()[0].id;

        let path = ctx.temp_dir.path().join("board.db");
        let mut service = TaskService::new(Db::open(&path).unwrap(), Identity::new(ada.id));
        service.create_task(&NewTask::new(project, open, "one")).unwrap();
        service.create_task(&NewTask::new(project, open, "two")).unwrap();

        Projects::new(&ctx.db.conn).delete(ada.id, project).unwrap();

        assert_eq!(Tasks::new(&ctx.db.conn).count_in_category(ada.id, open).unwrap(), 0);
        // the shared column itself survives
        assert!(Categories::new(&ctx.db.conn).get_by_id(ada.id, open).unwrap().is_some());
    }

    #[test_context(AccountContext)]
    #[test]
    fn test_project_bound_categories(ctx: &mut AccountContext) {
        let ada = account::signup(&mut ctx.db, "ada", "ada@example.com").unwrap();
        let eve = account::signup(&mut ctx.db, "eve", "eve@example.com").unwrap();
        let projects = Projects::new(&ctx.db.conn);
        let web = projects.create(ada.id, "Web", None).unwrap();
        let mobile = projects.create(ada.id, "Mobile", None).unwrap();
        let categories = Categories::new(&ctx.db.conn);

        let qa = categories.create(ada.id, Some(web), "QA", BoardStatus::Review).unwrap();

        let for_web = categories.list_for_project(ada.id, web).unwrap();
        let for_mobile = categories.list_for_project(ada.id, mobile).unwrap();
        assert_eq!(for_web.len(), 5);
        assert_eq!(for_mobile.len(), 4);
        assert!(for_web.iter().any(|c| c.id == qa));
        assert!(!for_mobile.iter().any(|c| c.id == qa));

        // eve cannot bind a column to ada's project
        assert!(matches!(
            categories.create(eve.id, Some(web), "Spy", BoardStatus::Open),
            Err(BoardError::NotFound { entity: EntityKind::Project, .. })
        ));

        let path = ctx.temp_dir.path().join("board.db");
        let mut service = TaskService::new(Db::open(&path).unwrap(), Identity::new(ada.id));
        assert!(matches!(
            service.create_task(&NewTask::new(mobile, qa, "Wrong board")),
            Err(BoardError::ValidationFailure(_))
        ));
        let task = service.create_task(&NewTask::new(web, qa, "Right board")).unwrap();
        assert_eq!(task.status, BoardStatus::Review);
    }

    #[test_context(AccountContext)]
    #[test]
    fn test_category_with_tasks_cannot_be_deleted(ctx: &mut AccountContext) {
        let ada = account::signup(&mut ctx.db, "ada", "ada@example.com").unwrap();
        let project = Projects::new(&ctx.db.conn).create(ada.id, "Web", None).unwrap();
        let categories = Categories::new(&ctx.db.conn);
        let column = categories.create(ada.id, Some(project), "Backlog", BoardStatus::Open).unwrap();

        let path = ctx.temp_dir.path().join("board.db");
        let mut service = TaskService::new(Db::open(&path).unwrap(), Identity::new(ada.id));
        let task = service.create_task(&NewTask::new(project, column, "Waiting")).unwrap();

        assert!(matches!(
            categories.delete(ada.id, column),
            Err(BoardError::ValidationFailure(_))
        ));

        service.delete_task(task.id).unwrap();
        categories.update(ada.id, column, Some("Icebox"), Some(BoardStatus::Complete)).unwrap();
        let renamed = categories.get_by_id(ada.id, column).unwrap().unwrap();
        assert_eq!(renamed.name, "Icebox");
        assert_eq!(renamed.status, BoardStatus::Complete);

        categories.delete(ada.id, column).unwrap();
        assert!(categories.get_by_id(ada.id, column).unwrap().is_none());
        assert!(matches!(
            categories.delete(ada.id, column),
            Err(BoardError::NotFound { .. })
        ));
    }
}
