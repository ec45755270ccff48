//! Containment, whitelist and type helpers shared by the rules

pub mod arguments;
pub mod attributes;
pub mod classes;
pub mod methods;
pub mod types;

pub use arguments::{
    argument_expressions, called_method, corresponding_parameter, enclosing_argument,
    is_array_index_argument, is_whitelisted_parameter, leading_parameter,
};
pub use attributes::{attribute_name, walk_to_attribute};
pub use classes::{
    all_containing_classes, class_names_to_top, containing_class, looks_like_migration,
    looks_like_primary_key_holder, MIGRATION_BASE_NAMES,
};
pub use methods::{is_abstract, is_public, method_name};
pub use types::{is_of_type, is_of_type_or_derived, is_task_like};
