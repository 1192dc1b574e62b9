use taskboard_shared::task::Task;
use uuid::Uuid;

use super::store_error::StoreError;

/// The store seam the API layer is written against. Implementations must make
/// every mutating call durable before returning.
pub trait TaskRepository: Send + Sync {
    fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;

    fn get_task(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    fn create_task(&self, task: &Task) -> Result<(), StoreError>;

    /// Read-modify-write of one record in a single transaction.
    /// Returns the stored result, or `None` if the id does not exist.
    fn update_task(&self, id: Uuid, mutate: &dyn Fn(&mut Task)) -> Result<Option<Task>, StoreError>;

    fn delete_task(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Applies `mutate` to every listed id that exists, in one transaction.
    /// Returns how many records were touched.
    fn update_tasks(&self, ids: &[Uuid], mutate: &dyn Fn(&mut Task)) -> Result<usize, StoreError>;

    /// Returns how many records were actually removed.
    fn delete_tasks(&self, ids: &[Uuid]) -> Result<usize, StoreError>;
}
