/*!
 * Data Structures
 * Specialized containers for hot paths
 */

mod inline_string;

pub use inline_string::InlineString;
