use base64::Engine;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdFileText, LdTrash2};
use dioxus_free_icons::Icon;
use shared_types::{
    accept_attribute, format_file_size, validate_upload, AppError, UploadedDocument,
    DEFAULT_MAX_UPLOAD_BYTES,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, FileDrop, PageHeader, Skeleton, ToastOptions,
};

use crate::i18n::{t, use_locale, Msg};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UploadStatus {
    Uploading,
    Done,
    Failed(String),
}

/// One file picked in this visit, with where its upload stands.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UploadItem {
    pub key: usize,
    pub file_name: String,
    pub status: UploadStatus,
}

/// Short label for the file type shown next to a document.
pub(crate) fn type_label(content_type: &str) -> &'static str {
    match content_type {
        "application/pdf" => "PDF",
        "text/plain" => "TXT",
        _ => "DOCX",
    }
}

/// Link serving a stored document's bytes.
pub(crate) fn download_href(id: uuid::Uuid) -> String {
    format!("/api/v1/documents/{id}/content")
}

/// Check the picked file's name, reported type and reported size before
/// any bytes are read.
pub(crate) fn precheck(file_name: &str, reported: Option<&str>, size: u64) -> Result<(), AppError> {
    validate_upload(file_name, reported, size, DEFAULT_MAX_UPLOAD_BYTES).map(|_| ())
}

fn set_status(mut items: Signal<Vec<UploadItem>>, key: usize, status: UploadStatus) {
    if let Some(item) = items.write().iter_mut().find(|i| i.key == key) {
        item.status = status;
    }
}

/// Upload area plus the list of the user's stored documents.
#[component]
pub fn DocumentUploadInterface() -> Element {
    let locale = use_locale();
    let toast = use_toast();
    let mut items = use_signal(Vec::<UploadItem>::new);
    let mut next_key = use_signal(|| 0usize);

    let mut documents = use_resource(move || async move { server::api::list_documents().await });

    let handle_files = move |evt: FormEvent| async move {
        for file in evt.files() {
            let file_name = file.name();
            let reported = file.content_type();
            let key = next_key();
            next_key.set(key + 1);
            items.write().push(UploadItem {
                key,
                file_name: file_name.clone(),
                status: UploadStatus::Uploading,
            });

            if let Err(err) = precheck(&file_name, reported.as_deref(), file.size()) {
                set_status(items, key, UploadStatus::Failed(err.message));
                continue;
            }

            let bytes = match file.read_bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(file = %file_name, "could not read picked file: {e}");
                    set_status(items, key, UploadStatus::Failed(t(locale, Msg::UploadFailed).to_string()));
                    continue;
                }
            };

            let content_type = match validate_upload(
                &file_name,
                reported.as_deref(),
                bytes.len() as u64,
                DEFAULT_MAX_UPLOAD_BYTES,
            ) {
                Ok(content_type) => content_type,
                Err(err) => {
                    set_status(items, key, UploadStatus::Failed(err.message));
                    continue;
                }
            };

            let data = base64::engine::general_purpose::STANDARD.encode(&bytes);
            match server::api::upload_document(file_name.clone(), content_type.to_string(), data)
                .await
            {
                Ok(doc) => {
                    set_status(items, key, UploadStatus::Done);
                    toast.success(
                        format!("{}: {}", t(locale, Msg::Uploaded), doc.file_name),
                        ToastOptions::new(),
                    );
                    documents.restart();
                }
                Err(e) => {
                    let message = AppError::friendly_message(&e.to_string());
                    toast.error(
                        format!("{}: {file_name}", t(locale, Msg::UploadFailed)),
                        ToastOptions::new(),
                    );
                    set_status(items, key, UploadStatus::Failed(message));
                }
            }
        }
    };

    let uploading = items
        .read()
        .iter()
        .any(|item| item.status == UploadStatus::Uploading);

    let document_list = match &*documents.read() {
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "documents-empty", "{t(locale, Msg::NoDocuments)}" }
        },
        Some(Ok(list)) => rsx! {
            ul { class: "documents-list",
                for doc in list.iter().cloned() {
                    DocumentRow {
                        key: "{doc.id}",
                        doc,
                        on_deleted: move |_| documents.restart(),
                    }
                }
            }
        },
        Some(Err(e)) => rsx! {
            p { class: "documents-error", role: "alert", "{AppError::friendly_message(&e.to_string())}" }
        },
        None => rsx! { Skeleton { lines: 3 } },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./document_upload.css") }

        div { class: "documents-panel",
            PageHeader {
                title: t(locale, Msg::UploadTitle),
                description: t(locale, Msg::UploadDescription).to_string(),
            }

            FileDrop {
                accept: accept_attribute(),
                multiple: true,
                disabled: uploading,
                title: t(locale, Msg::DropFiles),
                hint: format!(
                    "{} · {}",
                    t(locale, Msg::AcceptedTypes),
                    format_file_size(DEFAULT_MAX_UPLOAD_BYTES)
                ),
                on_change: handle_files,
            }

            if !items.read().is_empty() {
                ul { class: "upload-progress",
                    for item in items.read().iter().cloned() {
                        li {
                            key: "{item.key}",
                            class: "upload-item",
                            "data-status": match &item.status {
                                UploadStatus::Uploading => "uploading",
                                UploadStatus::Done => "done",
                                UploadStatus::Failed(_) => "failed",
                            },
                            span { class: "upload-item-name", "{item.file_name}" }
                            {match item.status {
                                UploadStatus::Uploading => rsx! {
                                    span { class: "upload-item-state", "{t(locale, Msg::Uploading)}" }
                                },
                                UploadStatus::Done => rsx! {
                                    Badge { variant: BadgeVariant::Success, "{t(locale, Msg::Uploaded)}" }
                                },
                                UploadStatus::Failed(message) => rsx! {
                                    span { class: "upload-item-error", role: "alert", "{message}" }
                                },
                            }}
                        }
                    }
                }
            }

            Card { class: "documents-card",
                CardHeader {
                    CardTitle { "{t(locale, Msg::YourDocuments)}" }
                }
                CardContent { {document_list} }
            }
        }
    }
}

#[component]
fn DocumentRow(doc: UploadedDocument, on_deleted: EventHandler<()>) -> Element {
    let locale = use_locale();
    let toast = use_toast();
    let mut deleting = use_signal(|| false);
    let id = doc.id;

    rsx! {
        li { class: "document-row",
            Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 }
            div { class: "document-info",
                span { class: "document-name", "{doc.file_name}" }
                span { class: "document-meta",
                    {format_file_size(doc.size_bytes.max(0) as u64)}
                    " · "
                    {doc.created_at.format("%Y-%m-%d").to_string()}
                }
            }
            Badge { variant: BadgeVariant::Outline, {type_label(&doc.content_type)} }
            a {
                class: "document-download",
                href: download_href(id),
                download: "{doc.file_name}",
                title: t(locale, Msg::Download),
                "aria-label": t(locale, Msg::Download),
                Icon::<LdDownload> { icon: LdDownload, width: 16, height: 16 }
            }
            Button {
                variant: ButtonVariant::Ghost,
                loading: deleting(),
                title: t(locale, Msg::Delete),
                onclick: move |_| {
                    deleting.set(true);
                    spawn(async move {
                        match server::api::delete_document(id.to_string()).await {
                            Ok(()) => {
                                toast.success(t(locale, Msg::DocumentDeleted).to_string(), ToastOptions::new());
                                on_deleted.call(());
                            }
                            Err(e) => {
                                toast.error(AppError::friendly_message(&e.to_string()), ToastOptions::new());
                            }
                        }
                        deleting.set(false);
                    });
                },
                Icon::<LdTrash2> { icon: LdTrash2, width: 16, height: 16 }
            }
        }
    }
}
