use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};

use clap::Parser;
use log::{info, warn};
use serde::Deserialize;
use syl_filter_core::filter::{
	Corpus, FilterConfig, SyllableFilter, TargetCounts, VowelSet, VowelSource, DEFAULT_DELIMITER,
};
use syl_filter_core::io::{files_with_extension, resolve_folder};

/// Server configuration
#[derive(Parser, Debug)]
#[command(name = "syl-filter-server", about = "HTTP access to syllable-count filtering")]
struct ServerArgs {
	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to listen on
	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Folder holding the corpora (<name>.txt)
	#[arg(long, default_value = "./data")]
	data: String,

	/// Vowel file, one phoneme per line
	#[arg(long, default_value = "./data/vowels.txt")]
	vowels: PathBuf,

	/// Worker threads used by filtering, 0 uses every core
	#[arg(long, default_value_t = 0)]
	threads: usize,
}

/// Query parameters of `/v1/filter`
#[derive(Deserialize)]
struct FilterParams {
	counts: Option<String>,
}

/// Query parameters of `/v1/count`
#[derive(Deserialize)]
struct CountParams {
	word: Option<String>,
}

/// Query parameters of `/v1/load_corpus`
#[derive(Deserialize)]
struct CorpusQuery {
	name: Option<String>,
	delimiter: Option<String>,
}

struct SharedData {
	data_folder: PathBuf,
	vowels: VowelSet,
	threads: usize,
	filter: Option<SyllableFilter>,
}

impl SharedData {
	/// Builds a filter over `<data_folder>/<name>.txt` with the server vowels.
	fn load_corpus(&self, name: &str, delimiter: &str) -> Result<SyllableFilter, String> {
		let path = self.data_folder.join(format!("{}.txt", name));
		let corpus = Corpus::open(&path).map_err(|e| e.to_string())?;
		let vowels = VowelSource::InMemory(self.vowels.iter().map(str::to_owned).collect());
		let config = FilterConfig::new(vowels)
			.with_delimiter(delimiter)
			.with_threads(self.threads);
		SyllableFilter::new(corpus, &config).map_err(|e| e.to_string())
	}
}

/// Corpus names are plain file stems, never paths.
fn is_valid_name(name: &str) -> bool {
	!name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}

/// HTTP GET endpoint `/v1/filter`
///
/// Filters the loaded corpus for the syllable counts given in `counts`
/// (`"1"`, `"1,2"`, `"1-3"`). Returns matching words, one per line.
#[get("/v1/filter")]
async fn get_filtered(data: web::Data<Mutex<SharedData>>, query: web::Query<FilterParams>) -> impl Responder {
	let targets = match &query.counts {
		Some(s) => match s.parse::<TargetCounts>() {
			Ok(t) => t,
			Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
		},
		None => return HttpResponse::BadRequest().body("Missing syllable counts"),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Filter lock failed"),
	};

	match &shared_data.filter {
		Some(filter) => HttpResponse::Ok().body(filter.filter_words_parallel(targets).join("\n")),
		None => HttpResponse::Conflict().body("No corpus loaded"),
	}
}

/// HTTP GET endpoint `/v1/count`
///
/// Returns the syllable count of `word` with the loaded corpus settings.
#[get("/v1/count")]
async fn get_count(data: web::Data<Mutex<SharedData>>, query: web::Query<CountParams>) -> impl Responder {
	let word = match &query.word {
		Some(w) => w,
		None => return HttpResponse::BadRequest().body("Missing word"),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Filter lock failed"),
	};

	match &shared_data.filter {
		Some(filter) => HttpResponse::Ok().body(filter.count_syllables(word).to_string()),
		None => HttpResponse::Conflict().body("No corpus loaded"),
	}
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let folder = match data.lock() {
		Ok(m) => m.data_folder.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Filter lock failed"),
	};
	match files_with_extension(&folder, "txt") {
		Ok(files) => {
			let names: Vec<&str> = files.iter().filter_map(|f| f.strip_suffix(".txt")).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

#[get("/v1/loaded_corpus")]
async fn get_loaded_corpus(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Filter lock failed"),
	};
	match &shared_data.filter {
		Some(filter) => HttpResponse::Ok().body(format!("{}\n{}", filter.corpus().name(), filter.corpus().len())),
		None => HttpResponse::Conflict().body("No corpus loaded"),
	}
}

#[get("/v1/vowels")]
async fn get_vowels(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Filter lock failed"),
	};
	HttpResponse::Ok().body(shared_data.vowels.iter().collect::<Vec<_>>().join("\n"))
}

#[put("/v1/load_corpus")]
async fn put_corpus(data: web::Data<Mutex<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Filter lock failed"),
	};

	let name = match &query.name {
		Some(s) if is_valid_name(s.trim()) => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or invalid corpus name"),
	};
	let delimiter = query.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER);

	match shared_data.load_corpus(name, delimiter) {
		Ok(filter) => {
			info!("Loaded corpus '{}' ({} words)", name, filter.corpus().len());
			shared_data.filter = Some(filter);
			HttpResponse::Ok().body("Corpus loaded successfully")
		}
		Err(e) => {
			warn!("Failed to load corpus '{}': {}", name, e);
			HttpResponse::InternalServerError().body(format!("Failed to load corpus: {e}"))
		}
	}
}

/// Main entry point for the server.
///
/// Resolves the vowel file once, wraps the shared state in a `Mutex`
/// and starts an Actix-web HTTP server. No corpus is loaded until a
/// `PUT /v1/load_corpus` request names one.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = ServerArgs::parse();

	let vowels = VowelSource::FromPath(args.vowels).resolve()?;
	info!("{} vowels loaded, serving corpora from {}", vowels.len(), args.data);

	let shared_data = SharedData {
		data_folder: resolve_folder(&args.data),
		vowels,
		threads: args.threads,
		filter: None,
	};
	let shared_filter = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_filter.clone())
			.service(get_filtered)
			.service(get_count)
			.service(get_corpora)
			.service(get_loaded_corpus)
			.service(get_vowels)
			.service(put_corpus)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::body::to_bytes;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use std::fs;

	fn shared(folder: &std::path::Path) -> web::Data<Mutex<SharedData>> {
		web::Data::new(Mutex::new(SharedData {
			data_folder: folder.to_path_buf(),
			vowels: ["AA", "AE", "IY"].into_iter().collect(),
			threads: 1,
			filter: None,
		}))
	}

	macro_rules! app {
		($data:expr) => {
			test::init_service(
				App::new()
					.app_data($data.clone())
					.service(get_filtered)
					.service(get_count)
					.service(get_corpora)
					.service(get_loaded_corpus)
					.service(get_vowels)
					.service(put_corpus),
			)
			.await
		};
	}

	#[actix_web::test]
	async fn load_then_filter() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("iphod.txt"), "B.AA.T\nK.AE.T.AA.B\nS.IY\nT").unwrap();
		let data = shared(dir.path());
		let app = app!(data);

		let req = test::TestRequest::put().uri("/v1/load_corpus?name=iphod").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/filter?counts=1").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);
		assert_eq!(to_bytes(resp.into_body()).await.unwrap(), "B.AA.T\nS.IY");

		let req = test::TestRequest::get().uri("/v1/count?word=K.AE.T.AA.B").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "2");

		let req = test::TestRequest::get().uri("/v1/loaded_corpus").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "iphod\n4");
	}

	#[actix_web::test]
	async fn filter_needs_a_corpus() {
		let dir = tempfile::tempdir().unwrap();
		let data = shared(dir.path());
		let app = app!(data);

		let req = test::TestRequest::get().uri("/v1/filter?counts=1").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
	}

	#[actix_web::test]
	async fn bad_counts_are_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let data = shared(dir.path());
		let app = app!(data);

		let req = test::TestRequest::get().uri("/v1/filter?counts=abc").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
		let req = test::TestRequest::get().uri("/v1/filter").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn corpus_names_are_not_paths() {
		let dir = tempfile::tempdir().unwrap();
		let data = shared(dir.path());
		let app = app!(data);

		for uri in ["/v1/load_corpus?name=../secret", "/v1/load_corpus?name=", "/v1/load_corpus"] {
			let req = test::TestRequest::put().uri(uri).to_request();
			assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
		}

		let req = test::TestRequest::put().uri("/v1/load_corpus?name=missing").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[actix_web::test]
	async fn lists_corpora_and_vowels() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("iphod.txt"), "B.AA.T").unwrap();
		fs::write(dir.path().join("celex.txt"), "k.a.t").unwrap();
		fs::write(dir.path().join("iphod.bin"), "").unwrap();
		let data = shared(dir.path());
		let app = app!(data);

		let req = test::TestRequest::get().uri("/v1/corpora").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "celex\niphod");

		let req = test::TestRequest::get().uri("/v1/vowels").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "AA\nAE\nIY");
	}

	#[actix_web::test]
	async fn name_validation() {
		assert!(is_valid_name("iphod"));
		assert!(!is_valid_name(".hidden"));
		assert!(!is_valid_name("a/b"));
		assert!(!is_valid_name(""));
	}
}
