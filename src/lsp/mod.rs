//! LSP protocol feature implementations.
//!
//! Every feature works on an [`Extraction`](crate::extract::Extraction) and
//! reports positions through the host document's line index. Offsets in the
//! synthetic document are host offsets, so no remapping is needed.

mod completion;
mod diagnostics;
mod hover;
mod symbols;

pub use completion::completion_at_position;
pub use diagnostics::to_diagnostics;
pub use hover::hover_at_position;
pub use symbols::{document_symbols, folding_ranges};
