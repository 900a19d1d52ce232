// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partner dashboard server binary.

use std::path::PathBuf;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use dash_server::api::create_link_cipher;
use dash_server::{create_app_state, create_router, ServerConfig};
use dash_server_linkcrypt::LinkCipher;
use tower_http::{
	cors::{AllowOrigin, Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Partner dashboard server.
#[derive(Parser, Debug)]
#[command(name = "dash-server", about = "Partner dashboard API server", version)]
struct Args {
	/// TOML config file, overrides /etc/partner-dashboard/server.toml
	#[arg(long, env = "DASH_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
	/// Print a fresh link-encryption key
	GenerateLinkKey,
	/// Print the registration link for a space using the configured key
	RegistrationLink {
		#[arg(long)]
		space_id: String,
		#[arg(long)]
		email: String,
		/// Frontend base URL, defaults to http.base_url
		#[arg(long)]
		base_url: Option<String>,
	},
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
	let config = match path {
		Some(path) => dash_server_config::load_config_with_file(path)?,
		None => dash_server_config::load_config()?,
	};
	Ok(config)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
	let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
	if config.http.allows_any_origin() {
		return cors.allow_origin(Any);
	}

	let origins: Vec<HeaderValue> = config
		.http
		.cors_origins
		.iter()
		.filter_map(|origin| match HeaderValue::from_str(origin) {
			Ok(value) => Some(value),
			Err(_) => {
				tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
				None
			}
		})
		.collect();
	cors.allow_origin(AllowOrigin::list(origins))
}

fn print_registration_link(
	config: &ServerConfig,
	space_id: &str,
	email: &str,
	base_url: Option<String>,
) -> anyhow::Result<()> {
	if config.link.key.is_none() {
		anyhow::bail!("DASH_SERVER_LINK_KEY must be set to generate registration links");
	}
	let cipher = create_link_cipher(config)?;
	let (a, b) = cipher
		.registration_link_params(space_id, email)
		.context("failed to encrypt registration link")?;

	let base_url = base_url.unwrap_or_else(|| config.http.base_url.clone());
	println!("{}/register?a={a}&b={b}", base_url.trim_end_matches('/'));
	Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	match &args.command {
		Some(Command::Version) => {
			println!("dash-server {}", env!("CARGO_PKG_VERSION"));
			return Ok(());
		}
		Some(Command::GenerateLinkKey) => {
			println!("{}", LinkCipher::generate_key());
			return Ok(());
		}
		_ => {}
	}

	dotenvy::dotenv().ok();

	let config = load_config(args.config)?;

	if let Some(Command::RegistrationLink {
		space_id,
		email,
		base_url,
	}) = args.command
	{
		return print_registration_link(&config, &space_id, &email, base_url);
	}

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting dash-server"
	);

	let pool = dash_server_db::create_pool(&config.database.url).await?;
	dash_server_db::run_migrations(&pool).await?;

	let state = create_app_state(pool, &config).await?;

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(cors_layer(&config));

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
