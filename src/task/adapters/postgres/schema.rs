//! Diesel schema for task, project and comment persistence.

diesel::table! {
    /// Projects and their owners.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Owner subject.
        #[max_length = 255]
        owner -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records with workflow state.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Task type in canonical string form.
        #[max_length = 50]
        task_type -> Varchar,
        /// Task owner subject.
        #[max_length = 255]
        owner -> Varchar,
        /// Owning project.
        project_id -> Uuid,
        /// Workflow state in canonical string form.
        #[max_length = 50]
        state -> Varchar,
        /// Resolution in canonical string form.
        #[max_length = 50]
        resolution -> Nullable<Varchar>,
        /// Completion percentage.
        progress -> Int2,
        /// Optimistic write version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last change timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only task comments.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented task.
        task_id -> Uuid,
        /// Author subject.
        #[max_length = 255]
        author -> Varchar,
        /// Comment body.
        text -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(comments -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(projects, tasks, comments);
