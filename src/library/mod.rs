// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod library state: records, ordering, profiles and their JSON store.
//!
//! ```text
//! data_dir/
//!   mods.json        [LocalMod]
//!   profiles.json    [Profile]
//!   settings.json    Settings
//!
//! model     record types
//! priority  normalize / move / conflict check   (pure)
//! profile   enable-disable diff                 (pure)
//! store     load + atomic save
//! ```

mod model;
pub mod priority;
pub mod profile;
pub mod store;


pub use model::{LocalMod, Profile, Settings};
pub use store::LibraryStore;
