use crate::config::{AppConfig, EndpointBase, RequestTimeout};
use crate::translate::{TranslateError, TranslationRequest, TranslationResponse, Translator};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;

const LOG_TARGET: &str = "translate::http";

#[derive(Clone)]
pub struct HttpTranslator {
    client: Client,
    url: String,
}

impl HttpTranslator {
    pub fn new(endpoint: &EndpointBase, timeout: RequestTimeout) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(timeout.duration())
            .build()
            .map_err(TranslateError::Transport)?;
        Ok(Self {
            client,
            url: endpoint.translate_url(),
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, TranslateError> {
        Self::new(&cfg.endpoint, cfg.request_timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Translator for HttpTranslator {
    fn translate(
        &self,
        request: TranslationRequest,
    ) -> BoxFuture<'_, Result<TranslationResponse, TranslateError>> {
        async move {
            tracing::debug!(
                target: LOG_TARGET,
                url = %self.url,
                input_len = request.text.len(),
                "sending translation request"
            );

            let response = self
                .client
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .map_err(classify)?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unreadable body>".to_owned());
                return Err(TranslateError::Service {
                    status: status.as_u16(),
                    body,
                });
            }

            let bytes = response.bytes().await.map_err(classify)?;
            serde_json::from_slice::<TranslationResponse>(&bytes)
                .map_err(|e| TranslateError::InvalidResponse(format!("failed to parse JSON: {e}")))
        }
        .boxed()
    }
}

fn classify(e: reqwest::Error) -> TranslateError {
    if e.is_timeout() {
        TranslateError::Timeout
    } else {
        TranslateError::Transport(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_wire_shape() {
        let req = TranslationRequest {
            text: "  Hello ".into(),
            source_lang: crate::language::Language::En,
            target_lang: crate::language::Language::De,
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "text": "  Hello ", "source_lang": "en", "target_lang": "de" })
        );
    }

    #[test]
    fn response_requires_translated_text() {
        let ok: TranslationResponse =
            serde_json::from_str(r#"{"translated_text":"Hallo","extra":1}"#).expect("parse");
        assert_eq!(ok.translated_text, "Hallo");
        assert!(serde_json::from_str::<TranslationResponse>(r#"{"text":"Hallo"}"#).is_err());
    }

    #[test]
    fn url_targets_translate_path() {
        let ep = EndpointBase::new("http://127.0.0.1:8000/").expect("valid");
        let t = HttpTranslator::new(&ep, RequestTimeout::default()).expect("client");
        assert_eq!(t.url(), "http://127.0.0.1:8000/translate");
    }
}
