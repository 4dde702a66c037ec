//! In-memory repository fakes shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{ProjectId, TaskId, UserId};
use taskhub_domain::project::Project;
use taskhub_domain::task::Task;
use taskhub_domain::user::User;

use crate::ports::{ProjectRepository, TaskRepository, UserRepository};

#[derive(Default)]
struct State {
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
    users: Vec<User>,
}

/// One store backing all three ports, so project deletion can cascade to
/// tasks the way the database foreign key does.
#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl ProjectRepository for InMemoryStore {
    fn create(
        &self,
        project: Project,
    ) -> impl Future<Output = Result<Project, TaskHubError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.projects.insert(project.id, project.clone());
        async { Ok(project) }
    }

    fn get_by_id(
        &self,
        id: ProjectId,
    ) -> impl Future<Output = Result<Option<Project>, TaskHubError>> + Send {
        let state = self.state.lock().unwrap();
        let result = state.projects.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Project>, TaskHubError>> + Send {
        let state = self.state.lock().unwrap();
        let mut result: Vec<Project> = state.projects.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        async { Ok(result) }
    }

    fn exists(&self, id: ProjectId) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        let state = self.state.lock().unwrap();
        let result = state.projects.contains_key(&id);
        async move { Ok(result) }
    }

    fn update(
        &self,
        project: Project,
    ) -> impl Future<Output = Result<Option<Project>, TaskHubError>> + Send {
        let mut state = self.state.lock().unwrap();
        let result = state
            .projects
            .get_mut(&project.id)
            .map(|slot| {
                *slot = project.clone();
                project
            });
        async { Ok(result) }
    }

    fn delete(&self, id: ProjectId) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        let mut state = self.state.lock().unwrap();
        let removed = state.projects.remove(&id).is_some();
        state.tasks.retain(|_, task| task.project_id != id);
        async move { Ok(removed) }
    }
}

impl TaskRepository for InMemoryStore {
    fn create(&self, task: Task) -> impl Future<Output = Result<Task, TaskHubError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.tasks.insert(task.id, task.clone());
        async { Ok(task) }
    }

    fn get_by_id(
        &self,
        id: TaskId,
    ) -> impl Future<Output = Result<Option<Task>, TaskHubError>> + Send {
        let state = self.state.lock().unwrap();
        let result = state.tasks.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Task>, TaskHubError>> + Send {
        let state = self.state.lock().unwrap();
        let mut result: Vec<Task> = state.tasks.values().cloned().collect();
        result.sort_by_key(|task| task.due_date);
        async { Ok(result) }
    }

    fn find_by_project(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<Vec<Task>, TaskHubError>> + Send {
        let state = self.state.lock().unwrap();
        let mut result: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect();
        result.sort_by_key(|task| task.due_date);
        async { Ok(result) }
    }

    fn update(
        &self,
        task: Task,
    ) -> impl Future<Output = Result<Option<Task>, TaskHubError>> + Send {
        let mut state = self.state.lock().unwrap();
        let result = state.tasks.get_mut(&task.id).map(|slot| {
            *slot = task.clone();
            task
        });
        async { Ok(result) }
    }

    fn delete(&self, id: TaskId) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        let mut state = self.state.lock().unwrap();
        let removed = state.tasks.remove(&id).is_some();
        async move { Ok(removed) }
    }
}

impl UserRepository for InMemoryStore {
    fn create(&self, user: User) -> impl Future<Output = Result<User, TaskHubError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.users.push(user.clone());
        async { Ok(user) }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, TaskHubError>> + Send {
        let state = self.state.lock().unwrap();
        let result = state.users.iter().find(|user| user.id == id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, TaskHubError>> + Send {
        let state = self.state.lock().unwrap();
        let result = state.users.clone();
        async { Ok(result) }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, TaskHubError>> + Send {
        let state = self.state.lock().unwrap();
        let result = state
            .users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned();
        async { Ok(result) }
    }

    fn update(
        &self,
        user: User,
    ) -> impl Future<Output = Result<Option<User>, TaskHubError>> + Send {
        let mut state = self.state.lock().unwrap();
        let result = state
            .users
            .iter_mut()
            .find(|slot| slot.id == user.id)
            .map(|slot| {
                *slot = user.clone();
                user
            });
        async { Ok(result) }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, TaskHubError>> + Send {
        let mut state = self.state.lock().unwrap();
        let before = state.users.len();
        state.users.retain(|user| user.id != id);
        let removed = state.users.len() != before;
        async move { Ok(removed) }
    }
}
