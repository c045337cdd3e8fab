/*!
 * # Editing Core Module
 *
 * The document model the annotation engine reads from.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - The entire document is stored in a single **`xi_rope::Rope`** buffer
 * - **Lossless round-trip**: saving writes rope bytes verbatim
 * - Markers and decorations are layered on top as byte spans; the text itself
 *   is never rewritten to render a marker
 *
 * ### 2. Command-Based Editing
 * - All edits are represented as **Commands** (`Cmd` enum) that compile to
 *   xi-rope **Deltas**
 * - Commands are validated before compilation: ranges must lie inside the
 *   buffer and on character boundaries
 *
 * ### 3. Syntax Tree
 * - A lossless Rowan tree from `marginalia-syntax` is kept in sync with the
 *   buffer, re-parsed after every edit
 * - The tree is what the marker scanner walks, through the
 *   [`NodeSource`](crate::syntax::NodeSource) boundary
 *
 * ## Module Structure
 *
 * - **`document`**: Core `Document` type with rope buffer and syntax tree
 * - **`commands`**: `Cmd` enum and delta compilation
 * - **`patch`**: Edit result metadata (changed ranges, new version)
 * - **`lines`**: Line iteration with byte spans
 *
 * ## Usage Pattern
 *
 * ```rust
 * use marginalia_engine::editing::*;
 *
 * let mut doc = Document::from_bytes(b"See [Topic]{annotation=3}\n").unwrap();
 *
 * let patch = doc.apply(Cmd::InsertText { at: 0, text: "# ".to_string() }).unwrap();
 * assert_eq!(patch.version, 1);
 * assert_eq!(doc.text(), "# See [Topic]{annotation=3}\n");
 * ```
 */

pub mod commands;
pub mod document;
pub mod lines;
pub mod patch;

pub use commands::Cmd;
pub use document::Document;
pub use lines::LineRef;
pub use patch::Patch;
