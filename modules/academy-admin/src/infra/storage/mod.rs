//! sea-orm persistence: entities, the relationship graph used for tenant
//! scoping, dependency rules, the generic resource repository and the schema
//! migration.

pub mod academy_directory;
pub mod admin_entity;
pub mod dependencies;
pub mod entity;
pub mod migrations;
pub mod relations;
pub mod resource_repo;

pub use academy_directory::SeaOrmAcademyDirectory;
pub use resource_repo::OrmResourceRepository;
