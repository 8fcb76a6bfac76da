use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe, reference-counted resource container with read-write locking.
///
/// `MtResource` provides synchronized access to a value of type `T` that can be shared
/// across threads. It uses an `Arc<RwLock<T>>` internally. Workers take read guards
/// (meshing reads the world), the owning thread takes write guards (inserting chunks,
/// storing meshes).
///
/// A poisoned lock is recovered rather than propagated: the only writers are task
/// result handlers, which leave the world consistent between statements.
///
/// # Examples
///
/// ```
/// use voxel_world::core::MtResource;
///
/// let counter = MtResource::new(0);
/// let counter_clone = counter.clone();
///
/// std::thread::spawn(move || {
///     *counter_clone.get_mut() += 1;
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(*counter.get(), 1);
/// ```
pub struct MtResource<T: Send + Sync> {
    resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync + 'static> MtResource<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read-only guard on the contained value.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a mutable guard on the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes the value back out if this is the last handle.
    ///
    /// # Returns
    /// `Err(self)` while other clones are still alive.
    pub fn try_into_inner(self) -> Result<T, Self> {
        match Arc::try_unwrap(self.resource) {
            Ok(lock) => Ok(lock.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(resource) => Err(Self { resource }),
        }
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}
