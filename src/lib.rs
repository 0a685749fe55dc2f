// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |         library / profile / online
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          manager          |
//!              |  install, toggle, order,  |
//!              |  profiles, updates        |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!              library   deploy   remote ----> net
//!              records   links    catalog     HTTP/DL
//!              order     mods.txt cache
//!              profiles           rate limit
//!
//!   +-----------------------------------------+
//!   |  archive (zip)   launch (game process)  |
//!   +-----------------------------------------+
//!   |  foundation  config, error, logging,    |
//!   |              utility                    |
//!   +-----------------------------------------+
//! ```

pub mod archive;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod deploy;
pub mod error;
pub mod launch;
pub mod library;
pub mod logging;
pub mod manager;
pub mod net;
pub mod remote;
pub mod utility;
