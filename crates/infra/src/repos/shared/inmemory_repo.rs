use alliance_calendar_domain::{Entity, ID};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Useful functions for creating inmemory repositories

fn lock<T>(collection: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    // A panic while holding the lock cannot leave a `Vec` half written
    collection.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the entity with the same id or appends it
pub fn upsert<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    upsert_by(val, collection, |existing| existing.id() == val.id());
}

/// Replaces the first item matching `compare` or appends `val`.
/// Returns the replaced item.
pub fn upsert_by<T: Clone, F: Fn(&T) -> bool>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Option<T> {
    let mut collection = lock(collection);
    match collection.iter().position(|item| compare(item)) {
        Some(index) => Some(std::mem::replace(&mut collection[index], val.clone())),
        None => {
            collection.push(val.clone());
            None
        }
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    lock(collection)
        .iter()
        .find(|item| item.id() == val_id)
        .cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    lock(collection)
        .iter()
        .filter(|item| compare(item))
        .cloned()
        .collect()
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = lock(collection);
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}

pub fn find_and_delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Vec<T> {
    let mut collection = lock(collection);
    let mut deleted_items = Vec::new();
    let mut index = 0;
    while index < collection.len() {
        if compare(&collection[index]) {
            deleted_items.push(collection.remove(index));
        } else {
            index += 1;
        }
    }
    deleted_items
}
