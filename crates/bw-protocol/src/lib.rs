//! `bw-protocol`: what team members say to each other.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`message`]   | `Message` tagged union, `MessageKind`, `GoalBlockReport`       |
//! | [`codec`]     | `encode` / `decode` between `Message` and the sentence form    |
//! | [`transport`] | `Envelope`, `Received`, `Transport` trait, `Mailbox`           |
//! | [`error`]     | `ProtocolError`, `ProtocolResult<T>`                           |
//!
//! # Wire form
//!
//! Messages travel as short English sentences so that human teammates in the
//! same channel can read them:
//!
//! ```text
//! Moving to room_3
//! Found goal block {"size":0.5,"shape":1,"colour":"#ff0000"} at location (10, 4)
//! Dropped goal block {"size":0.5,"shape":1,"colour":null} at drop location (12, 22)
//! ```
//!
//! The sender is never part of the sentence; it rides on the [`Envelope`].
//! Decoding a sentence that matches no known kind is a [`ProtocolError`],
//! which receivers treat as "skip this message".

pub mod codec;
pub mod error;
pub mod message;
pub mod transport;


pub use codec::{decode, encode};
pub use error::{ProtocolError, ProtocolResult};
pub use message::{GoalBlockReport, Message, MessageKind};
pub use transport::{Envelope, Mailbox, Received, Transport};
