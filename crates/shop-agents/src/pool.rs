//! Id-keyed customer storage.

use rustc_hash::FxHashMap;

use shop_core::CustomerId;
use shop_world::Navigator;

use crate::customer::Customer;

/// All live customers, keyed by id.
///
/// Insertion and removal happen only in the sim's serialized tick phases;
/// the dispatcher's service-order scan reads through
/// [`is_waiting`][CustomerPool::is_waiting].
#[derive(Default)]
pub struct CustomerPool<N: Navigator> {
    customers: FxHashMap<CustomerId, Customer<N>>,
}

impl<N: Navigator> CustomerPool<N> {
    pub fn new() -> Self {
        Self { customers: FxHashMap::default() }
    }

    pub fn insert(&mut self, customer: Customer<N>) {
        self.customers.insert(customer.id, customer);
    }

    pub fn remove(&mut self, id: CustomerId) -> Option<Customer<N>> {
        self.customers.remove(&id)
    }

    #[inline]
    pub fn get(&self, id: CustomerId) -> Option<&Customer<N>> {
        self.customers.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: CustomerId) -> Option<&mut Customer<N>> {
        self.customers.get_mut(&id)
    }

    #[inline]
    pub fn contains(&self, id: CustomerId) -> bool {
        self.customers.contains_key(&id)
    }

    /// Predicate for the dispatcher's next-waiting scan.  Unknown ids are
    /// simply not waiting.
    #[inline]
    pub fn is_waiting(&self, id: CustomerId) -> bool {
        self.customers.get(&id).is_some_and(Customer::is_waiting)
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
