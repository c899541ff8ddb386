#![allow(dead_code)]

//! In-process fake of the roster REST API, served by actix-web on an
//! ephemeral port so `ApiClient` can be exercised over real HTTP.

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, dev::ServerHandle, web};
use chrono::Utc;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::env;
use std::sync::Mutex;
use tempfile::TempDir;

use roster::config::Config;
use roster::models::{
    AssignPlayerInput, CreatePlayerInput, CreateTeamInput, Player, Team, UpdatePlayerInput,
    UpdateTeamInput,
};
use roster::ApiClient;

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "secret";

pub struct BackendState {
    pub token: String,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub reject_names: HashSet<String>,
    pub create_bodies: Vec<Value>,
    pub correlation_ids: Vec<String>,
    /// Answer deletes with a plain text body instead of JSON.
    pub plain_text_deletes: bool,
    next_team_id: i64,
    next_player_id: i64,
}

impl BackendState {
    fn new() -> Self {
        Self {
            token: "test-token-1".to_string(),
            teams: Vec::new(),
            players: Vec::new(),
            reject_names: HashSet::new(),
            create_bodies: Vec::new(),
            correlation_ids: Vec::new(),
            plain_text_deletes: false,
            next_team_id: 1,
            next_player_id: 1,
        }
    }

    pub fn add_team(&mut self, name: &str) -> Team {
        let team = Team {
            id: self.next_team_id,
            team_name: name.to_string(),
            team_logo: None,
            team_color: None,
            description: None,
            player_count: 0,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        self.next_team_id += 1;
        self.teams.push(team.clone());
        team
    }

    pub fn add_player(&mut self, input: &CreatePlayerInput) -> Player {
        let player = Player {
            id: self.next_player_id,
            player_name: input.player_name.trim().to_string(),
            position: input.position.clone(),
            jersey_number: input.jersey_number,
            team_id: input.team_id,
            team_name: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        self.next_player_id += 1;
        self.players.push(player.clone());
        player
    }

    fn with_count(&self, team: &Team) -> Team {
        let mut team = team.clone();
        team.player_count = self
            .players
            .iter()
            .filter(|p| p.team_id == Some(team.id))
            .count() as i64;
        team
    }
}

pub type SharedState = web::Data<Mutex<BackendState>>;

fn message(status: actix_web::http::StatusCode, text: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "success": false, "message": text }))
}

fn authorize(req: &HttpRequest, state: &SharedState) -> Result<(), HttpResponse> {
    let mut st = state.lock().unwrap();
    if let Some(id) = req
        .headers()
        .get("X-Correlation-ID")
        .and_then(|h| h.to_str().ok())
    {
        st.correlation_ids.push(id.to_string());
    }

    let expected = format!("Bearer {}", st.token);
    match req.headers().get("Authorization").and_then(|h| h.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(HttpResponse::Unauthorized()
            .json(json!({ "success": false, "message": "Invalid or expired token" }))),
    }
}

macro_rules! authorized {
    ($req:expr, $state:expr) => {
        if let Err(resp) = authorize(&$req, &$state) {
            return resp;
        }
    };
}

async fn login(state: SharedState, body: web::Json<Value>) -> HttpResponse {
    let st = state.lock().unwrap();
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if username == TEST_USERNAME && password == TEST_PASSWORD {
        HttpResponse::Ok().json(json!({
            "token": st.token,
            "user": { "id": 1, "username": TEST_USERNAME }
        }))
    } else {
        message(
            actix_web::http::StatusCode::UNAUTHORIZED,
            "Invalid username or password",
        )
    }
}

async fn register(body: web::Json<Value>) -> HttpResponse {
    if body["username"].as_str() == Some(TEST_USERNAME) {
        return message(actix_web::http::StatusCode::CONFLICT, "Username already taken");
    }
    HttpResponse::Created().json(json!({ "message": "User registered" }))
}

async fn me(req: HttpRequest, state: SharedState) -> HttpResponse {
    authorized!(req, state);
    HttpResponse::Ok().json(json!({ "id": 1, "username": TEST_USERNAME }))
}

async fn list_teams(req: HttpRequest, state: SharedState) -> HttpResponse {
    authorized!(req, state);
    let st = state.lock().unwrap();
    let teams: Vec<Team> = st.teams.iter().map(|t| st.with_count(t)).collect();
    HttpResponse::Ok().json(teams)
}

async fn get_team(req: HttpRequest, state: SharedState, path: web::Path<i64>) -> HttpResponse {
    authorized!(req, state);
    let st = state.lock().unwrap();
    match st.teams.iter().find(|t| t.id == *path) {
        Some(team) => HttpResponse::Ok().json(st.with_count(team)),
        None => message(actix_web::http::StatusCode::NOT_FOUND, "Team not found"),
    }
}

async fn create_team(
    req: HttpRequest,
    state: SharedState,
    body: web::Json<CreateTeamInput>,
) -> HttpResponse {
    authorized!(req, state);
    let mut st = state.lock().unwrap();
    if st.teams.iter().any(|t| t.team_name == body.team_name) {
        return message(actix_web::http::StatusCode::CONFLICT, "Team name already exists");
    }
    let mut team = st.add_team(&body.team_name);
    team.team_color = body.team_color.clone();
    team.team_logo = body.team_logo.clone();
    team.description = body.description.clone();
    if let Some(stored) = st.teams.iter_mut().find(|t| t.id == team.id) {
        *stored = team.clone();
    }
    HttpResponse::Created().json(team)
}

async fn update_team(
    req: HttpRequest,
    state: SharedState,
    path: web::Path<i64>,
    body: web::Json<UpdateTeamInput>,
) -> HttpResponse {
    authorized!(req, state);
    let mut st = state.lock().unwrap();
    let Some(team) = st.teams.iter_mut().find(|t| t.id == *path) else {
        return message(actix_web::http::StatusCode::NOT_FOUND, "Team not found");
    };
    let body = body.into_inner();
    if let Some(name) = body.team_name {
        team.team_name = name;
    }
    if body.team_color.is_some() {
        team.team_color = body.team_color;
    }
    if body.team_logo.is_some() {
        team.team_logo = body.team_logo;
    }
    if body.description.is_some() {
        team.description = body.description;
    }
    let team = team.clone();
    HttpResponse::Ok().json(st.with_count(&team))
}

async fn delete_team(req: HttpRequest, state: SharedState, path: web::Path<i64>) -> HttpResponse {
    authorized!(req, state);
    let mut st = state.lock().unwrap();
    let id = *path;
    if !st.teams.iter().any(|t| t.id == id) {
        return message(actix_web::http::StatusCode::NOT_FOUND, "Team not found");
    }
    st.teams.retain(|t| t.id != id);
    for player in st.players.iter_mut().filter(|p| p.team_id == Some(id)) {
        player.team_id = None;
    }
    if st.plain_text_deletes {
        return HttpResponse::Ok().content_type("text/plain").body("Team deleted");
    }
    HttpResponse::NoContent().finish()
}

async fn team_players(req: HttpRequest, state: SharedState, path: web::Path<i64>) -> HttpResponse {
    authorized!(req, state);
    let st = state.lock().unwrap();
    let players: Vec<&Player> = st
        .players
        .iter()
        .filter(|p| p.team_id == Some(*path))
        .collect();
    HttpResponse::Ok().json(players)
}

async fn list_players(
    req: HttpRequest,
    state: SharedState,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    authorized!(req, state);
    let st = state.lock().unwrap();
    let search = query.get("search").map(|s| s.to_lowercase());
    let team_id = query.get("team_id").and_then(|s| s.parse::<i64>().ok());
    let page = query.get("page").and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);
    let limit = query.get("limit").and_then(|s| s.parse::<usize>().ok()).unwrap_or(20);

    let matching: Vec<&Player> = st
        .players
        .iter()
        .filter(|p| {
            search
                .as_ref()
                .is_none_or(|s| p.player_name.to_lowercase().contains(s))
        })
        .filter(|p| team_id.is_none_or(|id| p.team_id == Some(id)))
        .collect();
    let data: Vec<&&Player> = matching
        .iter()
        .skip(page.saturating_sub(1) * limit)
        .take(limit)
        .collect();

    HttpResponse::Ok().json(json!({
        "data": data,
        "total": matching.len(),
        "page": page,
        "limit": limit,
    }))
}

async fn global_players(req: HttpRequest, state: SharedState) -> HttpResponse {
    authorized!(req, state);
    let st = state.lock().unwrap();
    let players: Vec<&Player> = st.players.iter().filter(|p| p.team_id.is_none()).collect();
    HttpResponse::Ok().json(players)
}

async fn get_player(req: HttpRequest, state: SharedState, path: web::Path<i64>) -> HttpResponse {
    authorized!(req, state);
    let st = state.lock().unwrap();
    match st.players.iter().find(|p| p.id == *path) {
        Some(player) => HttpResponse::Ok().json(player),
        None => message(actix_web::http::StatusCode::NOT_FOUND, "Player not found"),
    }
}

async fn create_player(
    req: HttpRequest,
    state: SharedState,
    body: web::Json<Value>,
) -> HttpResponse {
    authorized!(req, state);
    let mut st = state.lock().unwrap();
    let body = body.into_inner();
    st.create_bodies.push(body.clone());

    let input: CreatePlayerInput = match serde_json::from_value(body) {
        Ok(input) => input,
        Err(_) => return message(actix_web::http::StatusCode::BAD_REQUEST, "Invalid player"),
    };
    if input.player_name.trim().is_empty() {
        return message(actix_web::http::StatusCode::BAD_REQUEST, "Player name is required");
    }
    if st.reject_names.contains(&input.player_name) {
        return message(
            actix_web::http::StatusCode::CONFLICT,
            &format!("Player {} already exists", input.player_name),
        );
    }
    if let Some(team_id) = input.team_id {
        if !st.teams.iter().any(|t| t.id == team_id) {
            return message(actix_web::http::StatusCode::NOT_FOUND, "Team not found");
        }
    }
    HttpResponse::Created().json(st.add_player(&input))
}

async fn update_player(
    req: HttpRequest,
    state: SharedState,
    path: web::Path<i64>,
    body: web::Json<UpdatePlayerInput>,
) -> HttpResponse {
    authorized!(req, state);
    let mut st = state.lock().unwrap();
    let Some(player) = st.players.iter_mut().find(|p| p.id == *path) else {
        return message(actix_web::http::StatusCode::NOT_FOUND, "Player not found");
    };
    let body = body.into_inner();
    if let Some(name) = body.player_name {
        player.player_name = name;
    }
    if let Some(position) = body.position {
        player.position = position;
    }
    if body.jersey_number.is_some() {
        player.jersey_number = body.jersey_number;
    }
    HttpResponse::Ok().json(player.clone())
}

async fn delete_player(req: HttpRequest, state: SharedState, path: web::Path<i64>) -> HttpResponse {
    authorized!(req, state);
    let mut st = state.lock().unwrap();
    let before = st.players.len();
    st.players.retain(|p| p.id != *path);
    if st.players.len() == before {
        return message(actix_web::http::StatusCode::NOT_FOUND, "Player not found");
    }
    if st.plain_text_deletes {
        return HttpResponse::Ok().content_type("text/plain").body("Player deleted");
    }
    HttpResponse::Ok().json(json!({ "message": "Player deleted" }))
}

async fn assign_player(
    req: HttpRequest,
    state: SharedState,
    path: web::Path<i64>,
    body: web::Json<AssignPlayerInput>,
) -> HttpResponse {
    authorized!(req, state);
    let mut st = state.lock().unwrap();
    if !st.teams.iter().any(|t| t.id == body.team_id) {
        return message(actix_web::http::StatusCode::NOT_FOUND, "Team not found");
    }
    match st.players.iter_mut().find(|p| p.id == *path) {
        Some(player) => {
            player.team_id = Some(body.team_id);
            HttpResponse::Ok().json(player.clone())
        }
        None => message(actix_web::http::StatusCode::NOT_FOUND, "Player not found"),
    }
}

async fn unassign_player(
    req: HttpRequest,
    state: SharedState,
    path: web::Path<i64>,
) -> HttpResponse {
    authorized!(req, state);
    let mut st = state.lock().unwrap();
    match st.players.iter_mut().find(|p| p.id == *path) {
        Some(player) => {
            player.team_id = None;
            HttpResponse::Ok().json(player.clone())
        }
        None => message(actix_web::http::StatusCode::NOT_FOUND, "Player not found"),
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(login))
                    .route("/register", web::post().to(register))
                    .route("/me", web::get().to(me)),
            )
            .service(
                web::scope("/teams")
                    .route("", web::get().to(list_teams))
                    .route("", web::post().to(create_team))
                    .route("/{id}", web::get().to(get_team))
                    .route("/{id}", web::put().to(update_team))
                    .route("/{id}", web::delete().to(delete_team))
                    .route("/{id}/players", web::get().to(team_players)),
            )
            .service(
                web::scope("/players")
                    .route("", web::get().to(list_players))
                    .route("", web::post().to(create_player))
                    .route("/global", web::get().to(global_players))
                    .route("/{id}", web::get().to(get_player))
                    .route("/{id}", web::put().to(update_player))
                    .route("/{id}", web::delete().to(delete_player))
                    .route("/{id}/assign", web::put().to(assign_player))
                    .route("/{id}/unassign", web::put().to(unassign_player)),
            ),
    );
}

pub struct TestServer {
    pub base_url: String,
    pub state: SharedState,
    handle: ServerHandle,
}

impl TestServer {
    pub async fn start() -> Self {
        let state: SharedState = web::Data::new(Mutex::new(BackendState::new()));
        let data = state.clone();

        let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(routes))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("Failed to bind test server");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        TestServer {
            base_url: format!("http://{}/api", addr),
            state,
            handle,
        }
    }

    pub fn backend(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }

    /// Invalidate the token every client currently holds.
    pub fn rotate_token(&self) {
        let mut st = self.backend();
        st.token = format!("{}-rotated", st.token);
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

pub struct TestContext {
    pub server: TestServer,
    pub config: Config,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        setup_test_env();
        let server = TestServer::start().await;
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let config = Config {
            api_base_url: server.base_url.clone(),
            session_file: temp_dir.path().join("session.json"),
            request_timeout_secs: 5,
            export_dir: temp_dir.path().to_path_buf(),
            environment: "test".to_string(),
        };

        TestContext {
            server,
            config,
            temp_dir,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config.clone()).expect("Failed to build client")
    }

    pub async fn logged_in_client(&self) -> ApiClient {
        let client = self.client();
        client
            .login(TEST_USERNAME, TEST_PASSWORD)
            .await
            .expect("Login failed");
        client
    }

    pub fn session_exists(&self) -> bool {
        self.config.session_file.exists()
    }
}

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}
