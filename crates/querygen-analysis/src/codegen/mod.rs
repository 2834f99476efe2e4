//! Query template code generation: constant folding, directive parsing,
//! descriptor building and Go emission.

pub mod descriptor;
pub mod emit;
pub mod fold;
pub mod template;

pub use descriptor::{build, DescriptorBuilder, FieldDescriptor, ParamDescriptorSet, Substitution};
pub use emit::emit;
pub use fold::ConstantFolder;
pub use template::{is_query_const_name, parse_directives, Directive, TypeExpr};
