//! Attribute-inheritance tree transducer.
//!
//! Walks one formatting-object subtree and produces one content node. Each
//! element's attributes are parsed into a local style, combined with the
//! style inherited from its parent, and only the difference is emitted on the
//! output node. Children that mix text with lists or tables are promoted to a
//! stack so that text sequences never contain block containers.

mod assemble;
mod list;
mod table;
mod transducer;

pub use list::{LabelKind, parse_list_label};
pub use table::{MAX_COLUMN_COUNT, parse_column_width};
pub use transducer::{TransduceOptions, Transducer};
