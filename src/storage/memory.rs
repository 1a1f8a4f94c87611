use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Per-tenant state cells backing the in-memory repositories.
///
/// Every tenant's rows sit behind their own mutex. A read-modify-write holds
/// only that tenant's lock, so calls for the same tenant are linearized while
/// other tenants proceed independently.
pub struct TenantCells<T> {
    cells: RwLock<HashMap<String, Arc<Mutex<T>>>>,
}

impl<T: Default> TenantCells<T> {
    pub fn new() -> Self {
        Self {
            cells: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cell for `tenant`, creating an empty one on first use.
    pub async fn cell(&self, tenant: &str) -> Arc<Mutex<T>> {
        {
            let guard = self.cells.read().await;
            if let Some(cell) = guard.get(tenant) {
                return cell.clone();
            }
        }

        let mut guard = self.cells.write().await;
        guard
            .entry(tenant.to_string())
            .or_insert_with(|| {
                debug!(tenant = %tenant, "Creating in-memory tenant cell");
                Arc::new(Mutex::new(T::default()))
            })
            .clone()
    }

    /// Returns the cell for `tenant` only if something was ever written there.
    pub async fn existing(&self, tenant: &str) -> Option<Arc<Mutex<T>>> {
        self.cells.read().await.get(tenant).cloned()
    }

    #[cfg(test)]
    pub async fn tenant_count(&self) -> usize {
        self.cells.read().await.len()
    }
}

impl<T: Default> Default for TenantCells<T> {
    fn default() -> Self {
        Self::new()
    }
}
