//! HTTP client for the CRCRMS API

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Base URL of the API, fixed at build time.
pub const API_URL: &str = match option_env!("CRMS_API_URL") {
    Some(url) => url,
    None => "http://localhost:3000",
};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub fn url(path: &str) -> String {
    format!("{}{}", API_URL.trim_end_matches('/'), path)
}

/// Evidence links are stored relative to the API host.
pub fn file_url(stored: &str) -> String {
    if stored.starts_with('/') {
        url(stored)
    } else {
        stored.to_string()
    }
}

fn request(method: reqwest::Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
    let builder = reqwest::Client::new().request(method, url(path));
    match token {
        Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
        None => builder,
    }
}

async fn send<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> Result<T, String> {
    let response = builder.send().await.map_err(|e| e.to_string())?;
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|e| e.to_string());
    }

    match response.json::<ErrorBody>().await {
        Ok(body) => Err(body.error),
        Err(_) => Err(format!("request failed with {}", status)),
    }
}

pub async fn get<T: DeserializeOwned>(token: &str, path: &str) -> Result<T, String> {
    tracing::debug!("GET {}", path);
    send(request(reqwest::Method::GET, path, Some(token))).await
}

pub async fn get_with<Q: Serialize, T: DeserializeOwned>(
    token: &str,
    path: &str,
    query: &Q,
) -> Result<T, String> {
    tracing::debug!("GET {}", path);
    send(request(reqwest::Method::GET, path, Some(token)).query(query)).await
}

pub async fn post<B: Serialize, T: DeserializeOwned>(
    token: Option<&str>,
    path: &str,
    body: &B,
) -> Result<T, String> {
    tracing::debug!("POST {}", path);
    send(request(reqwest::Method::POST, path, token).json(body)).await
}

pub async fn put<B: Serialize, T: DeserializeOwned>(
    token: &str,
    path: &str,
    body: &B,
) -> Result<T, String> {
    tracing::debug!("PUT {}", path);
    send(request(reqwest::Method::PUT, path, Some(token)).json(body)).await
}

/// A file picked for upload, already read into memory.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

fn evidence_form(files: Vec<FileUpload>) -> Result<reqwest::multipart::Form, String> {
    let mut form = reqwest::multipart::Form::new();
    for file in files {
        let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.name);
        if !file.content_type.is_empty() {
            part = part.mime_str(&file.content_type).map_err(|e| e.to_string())?;
        }
        form = form.part("file", part);
    }
    Ok(form)
}

/// Attach files to a crime report as `file` parts of one multipart request.
pub async fn upload_evidence<T: DeserializeOwned>(
    token: &str,
    report_id: &str,
    files: Vec<FileUpload>,
) -> Result<T, String> {
    let path = format!("/api/crime-reports/{}/evidence", report_id);
    tracing::debug!("POST {} ({} files)", path, files.len());
    let form = evidence_form(files)?;
    send(request(reqwest::Method::POST, &path, Some(token)).multipart(form)).await
}

pub async fn delete(token: &str, path: &str) -> Result<(), String> {
    tracing::debug!("DELETE {}", path);
    send::<serde_json::Value>(request(reqwest::Method::DELETE, path, Some(token)))
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_path() {
        assert!(url("/api/dashboard").ends_with("/api/dashboard"));
        assert!(!url("/api/dashboard").contains("//api"));
    }

    #[test]
    fn test_evidence_form_rejects_bad_mime() {
        let file = |content_type: &str| FileUpload {
            name: "scene.jpg".into(),
            content_type: content_type.into(),
            bytes: vec![0xff, 0xd8],
        };
        assert!(evidence_form(vec![file("image/jpeg"), file("")]).is_ok());
        assert!(evidence_form(vec![file("not a mime type")]).is_err());
    }

    #[test]
    fn test_file_url() {
        assert_eq!(file_url("/files/a/b.jpg"), url("/files/a/b.jpg"));
        assert_eq!(file_url("https://cdn.example.com/b.jpg"), "https://cdn.example.com/b.jpg");
    }
}
