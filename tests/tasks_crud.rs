#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use taskboard::db::categories::Categories;
    use taskboard::db::db::Db;
    use taskboard::db::projects::Projects;
    use taskboard::db::tags::Tags;
    use taskboard::db::tasks::Tasks;
    use taskboard::libs::account;
    use taskboard::libs::error::{BoardError, EntityKind};
    use taskboard::libs::scope::Identity;
    use taskboard::libs::task::{BoardStatus, NewTask, TaskUpdate};
    use taskboard::libs::task_service::TaskService;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
        user: i64,
        project: i64,
        open: i64,
        progress: i64,
        tags: Vec<i64>,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("board.db");
            let mut db = Db::open(&path).unwrap();

            let user = account::signup(&mut db, "ada", "ada@example.com").unwrap();
            let project = Projects::new(&db.conn).create(user.id, "Website", Some("marketing site")).unwrap();
            let categories = Categories::new(&db.conn).list(user.id).unwrap();
            let tags = Tags::new(&db.conn).list(user.id).unwrap().into_iter().map(|t| t.id).collect();

            TaskTestContext {
                path,
                user: user.id,
                project,
                open: categories.iter().find(|c| c.status == BoardStatus::Open).unwrap().id,
                progress: categories.iter().find(|c| c.status == BoardStatus::InProgress).unwrap().id,
                tags,
                _temp_dir: temp_dir,
            }
        }
    }

    impl TaskTestContext {
        fn service(&self) -> TaskService {
            TaskService::new(Db::open(&self.path).unwrap(), Identity::new(self.user))
        }

        fn orders(&self, category: i64) -> Vec<(String, i64)> {
            let db = Db::open(&self.path).unwrap();
            Tasks::new(&db.conn)
                .list_in_scope(self.user, self.project, category)
                .unwrap()
                .into_iter()
                .map(|t| (t.title, t.display_order))
                .collect()
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_appends_to_column(ctx: &mut TaskTestContext) {
        let mut service = ctx.service();

        let first = service.create_task(&NewTask::new(ctx.project, ctx.open, "First")).unwrap();
        let second = service.create_task(&NewTask::new(ctx.project, ctx.open, "Second")).unwrap();
        let other = service.create_task(&NewTask::new(ctx.project, ctx.progress, "Elsewhere")).unwrap();

        assert_eq!(first.display_order, 0);
        assert_eq!(second.display_order, 1);
        assert_eq!(other.display_order, 0);
        assert_eq!(first.status, BoardStatus::Open);
        assert_eq!(other.status, BoardStatus::InProgress);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_with_details_and_tags(ctx: &mut TaskTestContext) {
        let mut service = ctx.service();
        let new_task = NewTask {
            description: Some("Hero section".to_string()),
            assignee: Some("grace".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 8),
            status: Some(BoardStatus::Review),
            ..NewTask::new(ctx.project, ctx.open, "Landing page")
        }
        .with_tags(&ctx.tags[..2]);

        let task = service.create_task(&new_task).unwrap();
        let fetched = service.get_task(task.id).unwrap();

        assert_eq!(fetched, task);
        assert_eq!(fetched.status, BoardStatus::Review);
        assert_eq!(fetched.assignee.as_deref(), Some("grace"));
        assert_eq!(fetched.end_date, NaiveDate::from_ymd_opt(2024, 3, 8));
        assert_eq!(fetched.tags.len(), 2);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_rejects_foreign_references(ctx: &mut TaskTestContext) {
        let mut service = ctx.service();
        let mut db = Db::open(&ctx.path).unwrap();
        let eve = account::signup(&mut db, "eve", "eve@example.com").unwrap();
        let eve_tag = Tags::new(&db.conn).list(eve.id).unwrap()[0].id;
        let eve_category = Categories::new(&db.conn).list(eve.id).unwrap()[0].id;

        let err = service
            .create_task(&NewTask::new(ctx.project, ctx.open, "Sneaky").with_tags(&[eve_tag]))
            .unwrap_err();
        assert!(matches!(err, BoardError::NotFound { entity: EntityKind::Tag, .. }));

        let err = service.create_task(&NewTask::new(ctx.project, eve_category, "Sneaky")).unwrap_err();
        assert!(matches!(err, BoardError::NotFound { entity: EntityKind::Category, .. }));

        let err = service.create_task(&NewTask::new(ctx.project, ctx.open, "  ")).unwrap_err();
        assert!(matches!(err, BoardError::ValidationFailure(_)));

        assert!(ctx.orders(ctx.open).is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_closes_gap(ctx: &mut TaskTestContext) {
        let mut service = ctx.service();
        let tasks: Vec<_> = ["t0", "t1", "t2", "t3"]
            .iter()
            .map(|title| service.create_task(&NewTask::new(ctx.project, ctx.open, title)).unwrap())
            .collect();

        assert!(service.delete_task(tasks[1].id).unwrap());

        assert_eq!(
            ctx.orders(ctx.open),
            vec![("t0".to_string(), 0), ("t2".to_string(), 1), ("t3".to_string(), 2)]
        );
        assert!(matches!(
            service.delete_task(tasks[1].id),
            Err(BoardError::NotFound { .. })
        ));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_keeps_position(ctx: &mut TaskTestContext) {
        let mut service = ctx.service();
        service.create_task(&NewTask::new(ctx.project, ctx.open, "Zero")).unwrap();
        let task = service.create_task(&NewTask::new(ctx.project, ctx.open, "Draft")).unwrap();

        let update = TaskUpdate {
            title: Some("Final".to_string()),
            status: Some(BoardStatus::Complete),
            ..Default::default()
        };
        let updated = service.update_task(task.id, &update).unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.status, BoardStatus::Complete);
        assert_eq!(updated.category_id, ctx.open);
        assert_eq!(updated.display_order, 1);
        assert!(updated.updated_at >= task.updated_at);

        let blank = TaskUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            service.update_task(task.id, &blank),
            Err(BoardError::ValidationFailure(_))
        ));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_add_and_remove_tags(ctx: &mut TaskTestContext) {
        let mut service = ctx.service();
        let task = service.create_task(&NewTask::new(ctx.project, ctx.open, "Tagged")).unwrap();

        let tagged = service.add_tags(task.id, &ctx.tags).unwrap();
        assert_eq!(tagged.tags.len(), ctx.tags.len());

        // adding twice keeps a single link
        let tagged = service.add_tags(task.id, &ctx.tags[..1]).unwrap();
        assert_eq!(tagged.tags.len(), ctx.tags.len());

        let untagged = service.remove_tags(task.id, &ctx.tags[1..]).unwrap();
        assert_eq!(untagged.tags.len(), 1);
        assert_eq!(untagged.tags[0].id, ctx.tags[0]);

        assert!(matches!(
            service.add_tags(task.id, &[9_999]),
            Err(BoardError::NotFound { entity: EntityKind::Tag, id: 9_999 })
        ));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_list_and_board(ctx: &mut TaskTestContext) {
        let mut service = ctx.service();
        for title in ["a", "b"] {
            service.create_task(&NewTask::new(ctx.project, ctx.open, title)).unwrap();
        }
        service.create_task(&NewTask::new(ctx.project, ctx.progress, "c")).unwrap();

        let listed = service.list_tasks(ctx.project).unwrap();
        assert_eq!(listed.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), vec!["a", "b", "c"]);

        let board = service.board(ctx.project).unwrap();
        assert_eq!(board.len(), 4);
        let open = board.iter().find(|column| column.category.id == ctx.open).unwrap();
        assert_eq!(open.tasks.iter().map(|t| t.display_order).collect::<Vec<_>>(), vec![0, 1]);
        let progress = board.iter().find(|column| column.category.id == ctx.progress).unwrap();
        assert_eq!(progress.tasks.len(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_other_users_cannot_read(ctx: &mut TaskTestContext) {
        let mut service = ctx.service();
        let task = service.create_task(&NewTask::new(ctx.project, ctx.open, "Private")).unwrap();

        let mut db = Db::open(&ctx.path).unwrap();
        let eve = account::signup(&mut db, "eve", "eve@example.com").unwrap();
        let mut eve_service = TaskService::new(db, Identity::new(eve.id));

        assert!(matches!(eve_service.get_task(task.id), Err(BoardError::NotFound { .. })));
        assert!(matches!(eve_service.list_tasks(ctx.project), Err(BoardError::NotFound { .. })));
        assert!(matches!(eve_service.delete_task(task.id), Err(BoardError::NotFound { .. })));
        assert_eq!(ctx.orders(ctx.open), vec![("Private".to_string(), 0)]);
    }
}
