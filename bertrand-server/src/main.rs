use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, delete, get, post, put, web};

use bertrand_core::events::{Intake, on_member_leave, on_message};
use bertrand_core::store::{FileStore, MessageStore, UserRegistry};
use bertrand_core::{Chain, GenerationConfig, LoadError, LoadPolicy, UserId};
use serde::Deserialize;

mod config;

use config::ServerConfig;

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	/// Comma separated user ids, ex. `users=1,2`
	users: Option<String>,
	/// Generate several sentences instead of one
	many: Option<bool>,
}

struct SharedData {
	messages: Arc<dyn MessageStore>,
	registry: Arc<dyn UserRegistry>,
	policy: LoadPolicy,
	generation: GenerationConfig,
}

impl GenerateParams {
	/// Parses the requested user ids.
	fn user_ids(&self) -> Result<Vec<UserId>, String> {
		let users = match &self.users {
			Some(s) if !s.trim().is_empty() => s.trim(),
			_ => return Err("Missing or empty user list".to_owned()),
		};

		users
			.split(',')
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(|s| s.parse::<UserId>().map_err(|_| format!("Invalid user id '{s}'")))
			.collect()
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Builds a chain from the stored messages of the requested users and
/// returns generated text as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let user_ids = match query.user_ids() {
		Ok(ids) => ids,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	// Store reads and training run on the blocking pool, off the worker thread
	let loaded = web::block(move || {
		Chain::load_with(data.messages.as_ref(), &user_ids, data.policy, data.generation.clone())
	})
	.await;
	let chain = match loaded {
		Ok(Ok(chain)) => chain,
		Ok(Err(e @ LoadError::Chain(_))) => return HttpResponse::UnprocessableEntity().body(e.to_string()),
		Ok(Err(e)) => return HttpResponse::InternalServerError().body(format!("Failed to load chain: {e}")),
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load chain: {e}")),
	};
	if chain.is_empty() {
		return HttpResponse::NotFound().body("No training data for these users");
	}

	let text = if query.many.unwrap_or(false) {
		chain.generate_many()
	} else {
		chain.generate_one()
	};
	HttpResponse::Ok().body(text)
}

#[put("/v1/users/{id}/opt_in")]
async fn put_opt_in(data: web::Data<SharedData>, path: web::Path<UserId>) -> impl Responder {
	let user_id = path.into_inner();
	match web::block(move || data.registry.opt_in(user_id)).await {
		Ok(Ok(())) => {
			log::info!("User {} opted in", user_id);
			HttpResponse::Ok().body("Opted in")
		}
		Ok(Err(e)) => HttpResponse::InternalServerError().body(format!("Failed to opt in: {e}")),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to opt in: {e}")),
	}
}

#[post("/v1/users/{id}/messages")]
async fn post_message(data: web::Data<SharedData>, path: web::Path<UserId>, body: String) -> impl Responder {
	let user_id = path.into_inner();
	match web::block(move || on_message(data.messages.as_ref(), data.registry.as_ref(), user_id, &body)).await {
		Ok(Ok(Intake::Stored)) => HttpResponse::Created().body("Message stored"),
		Ok(Ok(Intake::NotOptedIn)) => HttpResponse::Forbidden().body("User has not opted in"),
		Ok(Ok(Intake::TooShort)) => HttpResponse::UnprocessableEntity().body("Message is too short"),
		Ok(Err(e)) => HttpResponse::InternalServerError().body(format!("Failed to store message: {e}")),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to store message: {e}")),
	}
}

/// HTTP DELETE endpoint `/v1/users/{id}`
///
/// Called when a member leaves: removes everything stored for them.
#[delete("/v1/users/{id}")]
async fn delete_user(data: web::Data<SharedData>, path: web::Path<UserId>) -> impl Responder {
	let user_id = path.into_inner();
	match web::block(move || on_member_leave(data.registry.as_ref(), user_id)).await {
		Ok(Ok(true)) => HttpResponse::Ok().body("User data deleted"),
		Ok(Ok(false)) => HttpResponse::NotFound().body("User has not opted in"),
		Ok(Err(e)) => HttpResponse::InternalServerError().body(format!("Failed to delete user: {e}")),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to delete user: {e}")),
	}
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(put_opt_in)
		.service(post_message)
		.service(delete_user);
}

fn cors(allowed_origin: Option<&str>) -> Cors {
	match allowed_origin {
		Some(origin) => Cors::default()
			.allowed_origin(origin)
			.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"]),
		None => Cors::permissive(),
	}
}

/// Main entry point for the server.
///
/// Reads the configuration, opens the file store and starts an Actix-web
/// HTTP server sharing the store between workers.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = ServerConfig::load().map_err(|e| std::io::Error::other(e.to_string()))?;
	let store = Arc::new(FileStore::open(&config.store_path).map_err(std::io::Error::other)?);
	log::info!("Opened store at {}", store.path().display());

	let shared_data = web::Data::new(SharedData {
		messages: store.clone(),
		registry: store,
		policy: config.load_policy,
		generation: config.generation.clone(),
	});

	let allowed_origin = config.allowed_origin.clone();
	log::info!("Listening on {}:{} with {} workers", config.host, config.port, config.workers);
	HttpServer::new(move || {
		App::new()
			.wrap(cors(allowed_origin.as_deref()))
			.app_data(shared_data.clone())
			.configure(configure)
	})
		.workers(config.workers)
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
