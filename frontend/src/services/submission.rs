//! Service HTTP pour l'envoi des preuves de paiement vers le relay

use devpay_core::{ProofSubmitter, SubmissionError, SubmissionPayload, SubmissionResult};
use gloo_net::http::Request;
use serde::Deserialize;
use web_sys::{File, FormData};

/// Réponse du relay après transmission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofReceipt {
    pub proof_id: String,
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Envoie la preuve au relay en multipart (`file` + métadonnées)
#[derive(Debug, Clone)]
pub struct FormDataSubmitter {
    endpoint: String,
}

impl FormDataSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

impl ProofSubmitter for FormDataSubmitter {
    type File = File;

    async fn send(&self, payload: &SubmissionPayload<'_, File>) -> SubmissionResult<()> {
        // La taille est vérifiée à la sélection du fichier
        let file = payload.file;

        // Créer FormData
        let form_data = FormData::new().map_err(|e| SubmissionError::Network(format!("Failed to create FormData: {:?}", e)))?;
        for (name, value) in payload.metadata_fields() {
            form_data
                .append_with_str(name, &value)
                .map_err(|e| SubmissionError::Network(format!("Failed to append {}: {:?}", name, e)))?;
        }
        form_data
            .append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| SubmissionError::File(format!("Failed to append file: {:?}", e)))?;

        // Envoyer la requête
        let response = Request::post(&self.endpoint)
            .body(form_data)
            .map_err(|e| SubmissionError::Network(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| SubmissionError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(SubmissionError::Status {
            status,
            message: relay_message(&body),
        })
    }
}

/// Message d'erreur du relay, ou le corps brut
fn relay_message(body: &str) -> String {
    serde_json::from_str::<ProofReceipt>(body)
        .ok()
        .and_then(|r| r.error)
        .unwrap_or_else(|| body.to_string())
}
