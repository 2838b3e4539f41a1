use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use crate::components::icons::icon_file;
use crate::components::{page_shell, use_user_scope};
use crate::error::ApiError;
use crate::models::UploadOutcome;

const UPLOAD_OK: &str = "✅ Upload complete.";
const UPLOAD_FAILED: &str = "❌ Upload failed.";

#[derive(Clone, Debug, PartialEq)]
struct UploadNotice {
    text: String,
    failed: bool,
}

impl UploadNotice {
    fn from_result(result: &Result<UploadOutcome, ApiError>) -> Self {
        match result {
            Ok(outcome) => Self {
                text: outcome
                    .message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| UPLOAD_OK.to_string()),
                failed: false,
            },
            Err(_) => Self {
                text: UPLOAD_FAILED.to_string(),
                failed: true,
            },
        }
    }

    fn class(&self) -> &'static str {
        if self.failed {
            "font-medium text-red-600"
        } else {
            "font-medium text-green-600"
        }
    }
}

#[function_component(CsvUploadPage)]
pub fn csv_upload_page() -> Html {
    let scope = use_user_scope();
    let file = use_state(|| None::<File>);
    let message = use_state(|| None::<UploadNotice>);
    let uploading = use_state(|| false);

    let on_file = {
        let file = file.clone();
        let message = message.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            file.set(input.files().and_then(|files| files.get(0)));
            message.set(None);
        })
    };

    let on_upload = {
        let file = file.clone();
        let message = message.clone();
        let uploading = uploading.clone();
        Callback::from(move |_| {
            let (Some(selected), Some(user_id)) = ((*file).clone(), scope.user_id.clone()) else {
                return;
            };
            if *uploading {
                return;
            }
            uploading.set(true);
            let client = scope.client.clone();
            let message = message.clone();
            let uploading = uploading.clone();
            spawn_local(async move {
                tracing::info!(name = %selected.name(), size = selected.size(), "uploading csv");
                let result = client.upload_csv(&user_id, &selected).await;
                if let Err(err) = &result {
                    tracing::error!(error = %err, "csv upload failed");
                }
                message.set(Some(UploadNotice::from_result(&result)));
                uploading.set(false);
            });
        })
    };

    let disabled = file.is_none() || *uploading;

    let content = html! {
        <div class="max-w-xl mx-auto bg-white/80 rounded-2xl shadow-lg p-8 space-y-6 text-center">
            <div class="flex justify-center text-indigo-600">{ icon_file() }</div>
            <input type="file" accept=".csv" onchange={on_file}
                class="block w-full text-sm text-gray-600 file:mr-4 file:py-2 file:px-4 file:rounded-lg file:border-0 file:bg-indigo-50 file:text-indigo-700" />
            <button onclick={on_upload} {disabled}
                class="bg-indigo-600 text-white px-6 py-2 rounded-lg hover:bg-indigo-700 disabled:opacity-50">
                { if *uploading { "Uploading..." } else { "Upload" } }
            </button>
            if let Some(notice) = &*message {
                <p class={notice.class()}>{ notice.text.clone() }</p>
            }
        </div>
    };

    page_shell("CSV Upload", "Import transactions from a spreadsheet export", content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins() {
        let ok = Ok(UploadOutcome {
            message: Some("12 rows imported".to_string()),
        });
        let notice = UploadNotice::from_result(&ok);
        assert_eq!(notice.text, "12 rows imported");
        assert!(!notice.failed);
    }

    #[test]
    fn fallback_messages() {
        let ok = UploadNotice::from_result(&Ok(UploadOutcome { message: None }));
        assert_eq!(ok.text, UPLOAD_OK);
        let failed = UploadNotice::from_result(&Err(ApiError::from_response(500, "")));
        assert_eq!(failed.text, UPLOAD_FAILED);
    }

    #[test]
    fn failure_is_red_and_success_green() {
        let failed = UploadNotice::from_result(&Err(ApiError::Timeout));
        assert!(failed.failed);
        assert!(failed.class().contains("text-red-600"));

        let ok = UploadNotice::from_result(&Ok(UploadOutcome { message: None }));
        assert!(ok.class().contains("text-green-600"));
    }
}
