/// A resource that belongs to a single user.
///
/// `owner_id` returns `None` when the owner could not be determined, which
/// authorization treats as a server-side fault rather than a denial.
pub trait OwnedResource {
    fn owner_id(&self) -> Option<i64>;
}
