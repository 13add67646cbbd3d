use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::CompletionClient;
use crate::domain::{ApiKey, CompletionError, GenerationParams, GenerationRequest, Turn};

/// DeepInfra's OpenAI-compatible chat-completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.deepinfra.com/v1/openai/chat/completions";
pub const ENDPOINT_ENV: &str = "STORYCHAT_ENDPOINT";

/// Minimal subset of the chat-completion response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// [`CompletionClient`] that POSTs the whole conversation to an
/// OpenAI-compatible `/chat/completions` endpoint.
///
/// Only constructible with an [`ApiKey`], so no request can go out without a
/// credential. Uses `reqwest`'s default client settings: no retries and no
/// timeout beyond the transport's own.
///
/// Anything other than `200 OK` is a [`CompletionError::Status`] carrying the
/// raw body. A 200 whose body is not JSON, or has no `choices`, is reported
/// with the body as well.
pub struct HttpCompletionClient {
    client: reqwest::Client,
    api_key: ApiKey,
    endpoint: String,
}

impl HttpCompletionClient {
    pub fn new(api_key: ApiKey, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint: endpoint.into(),
        }
    }

    fn parse_reply(status: StatusCode, body: String) -> Result<Turn, CompletionError> {
        let api_response: ApiResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::MalformedResponse {
                status: status.as_u16(),
                reason: format!("invalid JSON: {e}"),
                body: body.clone(),
            })?;

        let choice = match api_response.choices {
            Some(choices) => choices.into_iter().next(),
            None => None,
        };
        let Some(choice) = choice else {
            return Err(CompletionError::MissingChoices {
                status: status.as_u16(),
                body,
            });
        };

        match choice.message.content {
            Some(content) => Ok(Turn::assistant(content)),
            None => Err(CompletionError::MalformedResponse {
                status: status.as_u16(),
                reason: "first choice has no message content".to_string(),
                body,
            }),
        }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        turns: &[Turn],
        params: &GenerationParams,
    ) -> Result<Turn, CompletionError> {
        let request = GenerationRequest::new(turns, params);
        debug!(
            "HttpCompletionClient: POST {} ({} messages, model {})",
            self.endpoint,
            request.message_count(),
            params.model()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, self.api_key.bearer())
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::transport(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::transport(format!("failed to read response: {e}")))?;

        if status != StatusCode::OK {
            warn!("HttpCompletionClient: API returned {status}: {body}");
            return Err(CompletionError::status(status.as_u16(), body));
        }

        Self::parse_reply(status, body)
    }

    fn name(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key() -> ApiKey {
        ApiKey::new("test-token").unwrap()
    }

    fn endpoint(server: &MockServer) -> String {
        format!("{}/v1/openai/chat/completions", server.uri())
    }

    fn conversation() -> Vec<Turn> {
        vec![
            Turn::system("You are a talented fiction writer"),
            Turn::user("A lighthouse keeper finds a letter."),
        ]
    }

    #[tokio::test]
    async fn test_sends_bearer_token_and_fixed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/openai/chat/completions"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "model": "mistralai/Mixtral-8x7B-Instruct-v0.1",
                "messages": [
                    {"role": "system", "content": "You are a talented fiction writer"},
                    {"role": "user", "content": "A lighthouse keeper finds a letter."}
                ],
                "temperature": 0.9,
                "max_tokens": 1024
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "The envelope was damp."}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpCompletionClient::new(key(), endpoint(&server));
        let reply = client
            .complete(&conversation(), &GenerationParams::default())
            .await
            .expect("completion");

        assert_eq!(reply, Turn::assistant("The envelope was damp."));
    }

    #[tokio::test]
    async fn test_non_200_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
            .mount(&server)
            .await;

        let client = HttpCompletionClient::new(key(), endpoint(&server));
        let err = client
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();

        assert_eq!(err, CompletionError::status(500, "internal failure"));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_non_200_success_code_is_still_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202).set_body_string("queued"))
            .mount(&server)
            .await;

        let client = HttpCompletionClient::new(key(), endpoint(&server));
        let err = client
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(202));
    }

    #[tokio::test]
    async fn test_missing_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "nope"})))
            .mount(&server)
            .await;

        let client = HttpCompletionClient::new(key(), endpoint(&server));
        let err = client
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::MissingChoices { status: 200, .. }));
        assert!(err.body().contains("nope"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = HttpCompletionClient::new(key(), endpoint(&server));
        let err = client
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::MalformedResponse { .. }));
        assert_eq!(err.body(), "<html>oops</html>");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = HttpCompletionClient::new(key(), format!("http://127.0.0.1:{port}/chat"));
        let err = client
            .complete(&conversation(), &GenerationParams::default())
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_parse_reply_takes_first_choice() {
        let body = json!({
            "choices": [
                {"message": {"content": "first"}},
                {"message": {"content": "second"}}
            ]
        })
        .to_string();

        let turn = HttpCompletionClient::parse_reply(StatusCode::OK, body).unwrap();
        assert_eq!(turn.content(), "first");
    }

    #[test]
    fn test_parse_reply_rejects_empty_choices() {
        let body = json!({"choices": []}).to_string();
        let err = HttpCompletionClient::parse_reply(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, CompletionError::MissingChoices { .. }));
    }
}
