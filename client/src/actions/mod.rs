//! Outbound operations. Each builds a [`RestAction`](crate::RestAction)
//! after running its local checks; a failed check returns the error right
//! away and nothing is sent.

mod guild;
mod message;
mod reaction;
