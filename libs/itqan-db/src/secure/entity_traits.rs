use sea_orm::EntityTrait;

/// Contract for entities whose rows belong to a tenant.
///
/// Every dimension is declared explicitly; there are no implicit defaults.
///
/// ```rust,ignore
/// impl ScopableEntity for lesson::Entity {
///     fn tenant_path() -> Option<&'static str> {
///         Some("course.academy")
///     }
///     fn resource_col() -> Option<Self::Column> {
///         Some(lesson::Column::Id)
///     }
///     fn soft_delete_col() -> Option<Self::Column> {
///         None
///     }
/// }
/// ```
pub trait ScopableEntity: EntityTrait {
    /// Marks global lookup tables that are never tenant filtered.
    const IS_UNRESTRICTED: bool = false;

    /// Dot-delimited relationship path from this entity to the tenant table.
    ///
    /// `None` on a restricted entity means tenant-scoped queries deny all rows.
    fn tenant_path() -> Option<&'static str>;

    /// Column holding the primary resource identifier.
    fn resource_col() -> Option<Self::Column>;

    /// Nullable timestamp column marking a row as soft-deleted.
    fn soft_delete_col() -> Option<Self::Column>;
}
