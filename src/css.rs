pub mod at_rule;
pub mod declaration;
pub mod gradient;
pub mod ruleset;
pub mod selector;
pub mod separator;
pub mod stylesheet;

pub use at_rule::NestedAtRule;
pub use declaration::{Declaration, DeclarationBlock};
pub use gradient::{is_gradient, process_gradient};
pub use ruleset::Ruleset;
pub use selector::{
    get_class_score, get_id_score, get_specificity, get_type_score, has_vendor_prefix,
    SpecificityScore,
};
pub use separator::{separate_code, split_rule_blocks, strip_comments, SeparatedCode};
pub use stylesheet::{minify_code, Stylesheet};
