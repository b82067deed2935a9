//! Interface strings in every supported language.

use dioxus::prelude::*;
use shared_types::Locale;

/// Every translatable interface string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    // Shell
    NavChat,
    NavPrecedent,
    NavUpload,
    OpenFullChat,
    BackToDashboard,
    SignOut,
    ToggleNavigation,
    Language,
    // Guard
    Loading,
    RedirectingToSignIn,
    // Chat
    ChatTitle,
    ChatEmpty,
    ChatPlaceholder,
    Send,
    NewConversation,
    AssistantTyping,
    You,
    Assistant,
    Conversations,
    NewChat,
    DeleteChat,
    NoConversations,
    // Precedents
    PrecedentTitle,
    PrecedentDescription,
    SearchPlaceholder,
    Search,
    Jurisdiction,
    AllJurisdictions,
    Result,
    Results,
    NoPrecedents,
    SearchPrompt,
    Relevance,
    ShowSummary,
    HideSummary,
    // Documents
    UploadTitle,
    UploadDescription,
    DropFiles,
    AcceptedTypes,
    Uploading,
    Uploaded,
    UploadFailed,
    YourDocuments,
    NoDocuments,
    Delete,
    Download,
    DocumentDeleted,
    // Accounts
    SignIn,
    SignInDescription,
    Email,
    Password,
    NoAccount,
    CreateAccount,
    CreateAccountDescription,
    Username,
    DisplayName,
    HaveAccount,
    RegistrationClosed,
    // Misc
    NotFoundTitle,
    NotFoundBody,
    GoToDashboard,
}

/// All messages, for catalog checks.
pub const ALL_MESSAGES: &[Msg] = &[
    Msg::NavChat,
    Msg::NavPrecedent,
    Msg::NavUpload,
    Msg::OpenFullChat,
    Msg::BackToDashboard,
    Msg::SignOut,
    Msg::ToggleNavigation,
    Msg::Language,
    Msg::Loading,
    Msg::RedirectingToSignIn,
    Msg::ChatTitle,
    Msg::ChatEmpty,
    Msg::ChatPlaceholder,
    Msg::Send,
    Msg::NewConversation,
    Msg::AssistantTyping,
    Msg::You,
    Msg::Assistant,
    Msg::Conversations,
    Msg::NewChat,
    Msg::DeleteChat,
    Msg::NoConversations,
    Msg::PrecedentTitle,
    Msg::PrecedentDescription,
    Msg::SearchPlaceholder,
    Msg::Search,
    Msg::Jurisdiction,
    Msg::AllJurisdictions,
    Msg::Result,
    Msg::Results,
    Msg::NoPrecedents,
    Msg::SearchPrompt,
    Msg::Relevance,
    Msg::ShowSummary,
    Msg::HideSummary,
    Msg::UploadTitle,
    Msg::UploadDescription,
    Msg::DropFiles,
    Msg::AcceptedTypes,
    Msg::Uploading,
    Msg::Uploaded,
    Msg::UploadFailed,
    Msg::YourDocuments,
    Msg::NoDocuments,
    Msg::Delete,
    Msg::Download,
    Msg::DocumentDeleted,
    Msg::SignIn,
    Msg::SignInDescription,
    Msg::Email,
    Msg::Password,
    Msg::NoAccount,
    Msg::CreateAccount,
    Msg::CreateAccountDescription,
    Msg::Username,
    Msg::DisplayName,
    Msg::HaveAccount,
    Msg::RegistrationClosed,
    Msg::NotFoundTitle,
    Msg::NotFoundBody,
    Msg::GoToDashboard,
];

/// (English, Spanish) pair for a message.
fn entry(msg: Msg) -> (&'static str, &'static str) {
    match msg {
        Msg::NavChat => ("Chat", "Chat"),
        Msg::NavPrecedent => ("Precedents", "Precedentes"),
        Msg::NavUpload => ("Documents", "Documentos"),
        Msg::OpenFullChat => ("Full-screen chat", "Chat en pantalla completa"),
        Msg::BackToDashboard => ("Back to dashboard", "Volver al panel"),
        Msg::SignOut => ("Sign out", "Cerrar sesión"),
        Msg::ToggleNavigation => ("Toggle navigation", "Mostrar u ocultar navegación"),
        Msg::Language => ("Language", "Idioma"),
        Msg::Loading => ("Loading…", "Cargando…"),
        Msg::RedirectingToSignIn => ("Redirecting to sign in…", "Redirigiendo al inicio de sesión…"),
        Msg::ChatTitle => ("Research chat", "Chat de investigación"),
        Msg::ChatEmpty => (
            "Ask a question about case law to get started.",
            "Haga una pregunta sobre jurisprudencia para comenzar.",
        ),
        Msg::ChatPlaceholder => ("Ask a legal research question…", "Escriba una pregunta jurídica…"),
        Msg::Send => ("Send", "Enviar"),
        Msg::NewConversation => ("New conversation", "Nueva conversación"),
        Msg::AssistantTyping => ("Counselor is thinking…", "Counselor está pensando…"),
        Msg::You => ("You", "Usted"),
        Msg::Assistant => ("Counselor", "Counselor"),
        Msg::Conversations => ("Conversations", "Conversaciones"),
        Msg::NewChat => ("New chat", "Nuevo chat"),
        Msg::DeleteChat => ("Delete conversation", "Eliminar conversación"),
        Msg::NoConversations => ("No saved conversations yet.", "Aún no hay conversaciones guardadas."),
        Msg::PrecedentTitle => ("Precedent finder", "Buscador de precedentes"),
        Msg::PrecedentDescription => (
            "Search prior decisions by citation, party or legal issue.",
            "Busque decisiones anteriores por cita, parte o tema jurídico.",
        ),
        Msg::SearchPlaceholder => ("e.g. segregation in public schools", "p. ej. segregación en escuelas públicas"),
        Msg::Search => ("Search", "Buscar"),
        Msg::Jurisdiction => ("Jurisdiction", "Jurisdicción"),
        Msg::AllJurisdictions => ("All", "Todas"),
        Msg::Result => ("result", "resultado"),
        Msg::Results => ("results", "resultados"),
        Msg::NoPrecedents => ("No precedents matched your search.", "Ningún precedente coincide con su búsqueda."),
        Msg::SearchPrompt => ("Enter a query to search the precedent library.", "Ingrese una consulta para buscar en la biblioteca de precedentes."),
        Msg::Relevance => ("Relevance", "Relevancia"),
        Msg::ShowSummary => ("Show full summary", "Ver resumen completo"),
        Msg::HideSummary => ("Hide summary", "Ocultar resumen"),
        Msg::UploadTitle => ("Documents", "Documentos"),
        Msg::UploadDescription => (
            "Upload briefs, contracts and notes to keep them with your research.",
            "Suba escritos, contratos y notas para tenerlos junto a su investigación.",
        ),
        Msg::DropFiles => ("Drop files here or click to browse", "Suelte archivos aquí o haga clic para elegir"),
        Msg::AcceptedTypes => ("PDF, DOCX or TXT", "PDF, DOCX o TXT"),
        Msg::Uploading => ("Uploading…", "Subiendo…"),
        Msg::Uploaded => ("Uploaded", "Subido"),
        Msg::UploadFailed => ("Upload failed", "Error al subir"),
        Msg::YourDocuments => ("Your documents", "Sus documentos"),
        Msg::NoDocuments => ("No documents uploaded yet.", "Aún no ha subido documentos."),
        Msg::Delete => ("Delete", "Eliminar"),
        Msg::Download => ("Download", "Descargar"),
        Msg::DocumentDeleted => ("Document deleted", "Documento eliminado"),
        Msg::SignIn => ("Sign in", "Iniciar sesión"),
        Msg::SignInDescription => (
            "Enter your credentials to access your research workspace.",
            "Ingrese sus credenciales para acceder a su espacio de investigación.",
        ),
        Msg::Email => ("Email", "Correo electrónico"),
        Msg::Password => ("Password", "Contraseña"),
        Msg::NoAccount => ("Don't have an account?", "¿No tiene una cuenta?"),
        Msg::CreateAccount => ("Create account", "Crear cuenta"),
        Msg::CreateAccountDescription => (
            "Start researching case law in minutes.",
            "Empiece a investigar jurisprudencia en minutos.",
        ),
        Msg::Username => ("Username", "Nombre de usuario"),
        Msg::DisplayName => ("Display name", "Nombre visible"),
        Msg::HaveAccount => ("Already have an account?", "¿Ya tiene una cuenta?"),
        Msg::RegistrationClosed => (
            "New registrations are currently closed.",
            "El registro de nuevas cuentas está cerrado por ahora.",
        ),
        Msg::NotFoundTitle => ("Page not found", "Página no encontrada"),
        Msg::NotFoundBody => (
            "The page you are looking for does not exist.",
            "La página que busca no existe.",
        ),
        Msg::GoToDashboard => ("Go to dashboard", "Ir al panel"),
    }
}

/// Translate `msg` into `locale`.
pub fn t(locale: Locale, msg: Msg) -> &'static str {
    let (en, es) = entry(msg);
    match locale {
        Locale::En => en,
        Locale::Es => es,
    }
}

/// Active interface language, provided once at the app root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocaleState {
    pub locale: Signal<Locale>,
}

impl LocaleState {
    pub fn new(initial: Locale) -> Self {
        Self {
            locale: Signal::new(initial),
        }
    }
}

/// Current locale. Defaults to English outside a `LocaleState` provider.
pub fn use_locale() -> Locale {
    try_use_context::<LocaleState>()
        .map(|state| (state.locale)())
        .unwrap_or_default()
}

/// Store the choice in the `locale` cookie and update `<html lang>`.
pub fn persist_locale(locale: Locale) {
    let code = locale.as_str();
    document::eval(&format!(
        "document.cookie = 'locale={code}; path=/; max-age=31536000; samesite=lax'; \
         document.documentElement.lang = '{code}';"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::ALL_LOCALES;

    #[test]
    fn every_message_has_every_translation() {
        for msg in ALL_MESSAGES {
            for locale in ALL_LOCALES {
                assert!(!t(*locale, *msg).trim().is_empty(), "{msg:?} missing for {locale:?}");
            }
        }
    }

    #[test]
    fn catalog_lists_each_message_once() {
        for (i, msg) in ALL_MESSAGES.iter().enumerate() {
            assert!(!ALL_MESSAGES[i + 1..].contains(msg), "{msg:?} listed twice");
        }
    }

    #[test]
    fn spanish_differs_for_sentences() {
        assert_eq!(t(Locale::En, Msg::SignOut), "Sign out");
        assert_eq!(t(Locale::Es, Msg::SignOut), "Cerrar sesión");
        assert_ne!(t(Locale::En, Msg::ChatEmpty), t(Locale::Es, Msg::ChatEmpty));
    }
}
