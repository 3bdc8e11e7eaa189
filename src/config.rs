// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for document storage | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SESSION_SECRET` | HS256 secret for session JWTs | Required for production |
//! | `CLIENT_URL` | Frontend base URL for reset links | `http://localhost:3000` |
//! | `SMTP_HOST` | SMTP relay host | Unset = email disabled |
//! | `SMTP_PORT` | SMTP relay port | `587` |
//! | `SMTP_USERNAME` | SMTP credentials | Required when SMTP_HOST set |
//! | `SMTP_PASSWORD` | SMTP credentials | Required when SMTP_HOST set |
//! | `SMTP_FROM` | From address for outgoing mail | Required when SMTP_HOST set |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the document storage directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the session JWT secret.
pub const SESSION_SECRET_ENV: &str = "SESSION_SECRET";

/// Environment variable name for the frontend base URL embedded in
/// password-reset links.
pub const CLIENT_URL_ENV: &str = "CLIENT_URL";

/// Environment variable names for the SMTP relay. Leaving `SMTP_HOST`
/// unset disables outgoing email entirely (sends are logged instead).
pub const SMTP_HOST_ENV: &str = "SMTP_HOST";
pub const SMTP_PORT_ENV: &str = "SMTP_PORT";
pub const SMTP_USERNAME_ENV: &str = "SMTP_USERNAME";
pub const SMTP_PASSWORD_ENV: &str = "SMTP_PASSWORD";
pub const SMTP_FROM_ENV: &str = "SMTP_FROM";
