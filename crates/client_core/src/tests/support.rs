//! In-process stand-in for the remote image service, plus test doubles.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use shared::{
    domain::{Comment, Image, ImageId},
    protocol::{CommentRequest, UploadResponse},
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    error::ServiceError,
    service::{ImageService, ImageUpload},
    sync::Refresher,
};

pub(crate) fn timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("timestamp")
}

pub(crate) fn sample_image(id: &str, likes: u64) -> Image {
    Image {
        id: ImageId::new(id),
        original_name: format!("{id}.png"),
        secure_url: format!("https://cdn.example/{id}.png"),
        format: "png".to_string(),
        bytes: 4096,
        width: 800,
        height: 600,
        uploaded_at: timestamp("2024-03-01T10:00:00Z"),
        likes,
        comments: Vec::new(),
    }
}

#[derive(Clone)]
pub(crate) enum UploadReply {
    Json(StatusCode, UploadResponse),
    Malformed,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub(crate) struct MockServerState {
    pub images: Arc<Mutex<Vec<Image>>>,
    pub list_calls: Arc<Mutex<u32>>,
    pub list_status: Arc<Mutex<Option<StatusCode>>>,
    pub upload_reply: Arc<Mutex<UploadReply>>,
    pub uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    pub likes: Arc<Mutex<Vec<String>>>,
    pub comments: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_mutations: Arc<Mutex<bool>>,
}

impl MockServerState {
    pub(crate) fn with_images(images: Vec<Image>) -> Self {
        Self {
            images: Arc::new(Mutex::new(images)),
            list_calls: Arc::new(Mutex::new(0)),
            list_status: Arc::new(Mutex::new(None)),
            upload_reply: Arc::new(Mutex::new(UploadReply::Json(
                StatusCode::OK,
                UploadResponse::accepted(),
            ))),
            uploads: Arc::new(Mutex::new(Vec::new())),
            likes: Arc::new(Mutex::new(Vec::new())),
            comments: Arc::new(Mutex::new(Vec::new())),
            fail_mutations: Arc::new(Mutex::new(false)),
        }
    }

    pub(crate) async fn list_calls(&self) -> u32 {
        *self.list_calls.lock().await
    }

    /// Requests that reached the server, excluding list reads.
    pub(crate) async fn write_calls(&self) -> usize {
        self.uploads.lock().await.len()
            + self.likes.lock().await.len()
            + self.comments.lock().await.len()
    }
}

async fn list_images(
    State(state): State<MockServerState>,
) -> Result<Json<Vec<Image>>, StatusCode> {
    *state.list_calls.lock().await += 1;
    if let Some(status) = *state.list_status.lock().await {
        return Err(status);
    }
    Ok(Json(state.images.lock().await.clone()))
}

async fn upload_image(State(state): State<MockServerState>, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.uploads.lock().await.push(RecordedUpload {
            filename,
            content_type,
            bytes,
        });
    }

    let reply = state.upload_reply.lock().await.clone();
    match reply {
        UploadReply::Json(status, body) => {
            if body.success {
                let mut images = state.images.lock().await;
                let id = format!("uploaded-{}", images.len() + 1);
                images.push(sample_image(&id, 0));
            }
            (status, Json(body)).into_response()
        }
        UploadReply::Malformed => (StatusCode::OK, "<html>bad gateway</html>").into_response(),
    }
}

async fn like_image(State(state): State<MockServerState>, Path(id): Path<String>) -> StatusCode {
    if *state.fail_mutations.lock().await {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    state.likes.lock().await.push(id.clone());
    let mut images = state.images.lock().await;
    match images.iter_mut().find(|image| image.id.as_str() == id) {
        Some(image) => {
            image.likes += 1;
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn comment_image(
    State(state): State<MockServerState>,
    Path(id): Path<String>,
    Json(request): Json<CommentRequest>,
) -> StatusCode {
    if *state.fail_mutations.lock().await {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    state
        .comments
        .lock()
        .await
        .push((id.clone(), request.text.clone()));
    let mut images = state.images.lock().await;
    match images.iter_mut().find(|image| image.id.as_str() == id) {
        Some(image) => {
            image.comments.push(Comment {
                text: request.text,
                created_at: timestamp("2024-03-02T08:30:00Z"),
            });
            StatusCode::CREATED
        }
        None => StatusCode::NOT_FOUND,
    }
}

pub(crate) async fn spawn_mock_server(state: MockServerState) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = Router::new()
        .route("/api/images", get(list_images))
        .route("/api/upload", post(upload_image))
        .route("/api/images/:id/like", post(like_image))
        .route("/api/images/:id/comment", post(comment_image))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// Address that refuses connections: bound, then released.
pub(crate) async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

#[derive(Default)]
pub(crate) struct CountingRefresher {
    calls: AtomicUsize,
}

impl CountingRefresher {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Refresher for CountingRefresher {
    async fn refresh(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Serves queued list responses, each after its own delay. Writes are
/// unsupported.
pub(crate) struct ScriptedListService {
    responses: Mutex<VecDeque<(Duration, Vec<Image>)>>,
}

impl ScriptedListService {
    pub(crate) fn new(responses: Vec<(Duration, Vec<Image>)>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl ImageService for ScriptedListService {
    async fn list_images(&self) -> Result<Vec<Image>, ServiceError> {
        let (delay, images) = self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_default();
        tokio::time::sleep(delay).await;
        Ok(images)
    }

    async fn upload_image(&self, _upload: ImageUpload) -> Result<UploadResponse, ServiceError> {
        Err(ServiceError::Status { status: 501 })
    }

    async fn like_image(&self, _image_id: &ImageId) -> Result<(), ServiceError> {
        Err(ServiceError::Status { status: 501 })
    }

    async fn add_comment(&self, _image_id: &ImageId, _text: &str) -> Result<(), ServiceError> {
        Err(ServiceError::Status { status: 501 })
    }
}
