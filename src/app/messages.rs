use super::model::{DishId, GeneratedTheme, MenuOutline, SectionId, ThemeKind};
use super::store::{DishField, InfoField};

/// All messages that can be sent through the FLTK channel.
/// Each widget callback sends one of these; the dispatch loop in main hands
/// them to `EditorState::handle`. Worker threads send the `*Generated` /
/// `*Fetched` completions.
#[derive(Debug, Clone)]
pub enum Message {
    // Restaurant info
    InfoChanged(InfoField, String),

    // Sections
    SectionAdd,
    SectionRemove(SectionId),
    SectionRename(SectionId, String),

    // Dishes
    DishAdd(SectionId),
    DishRemove(SectionId, DishId),
    DishFieldChanged(SectionId, DishId, DishField, String),
    DishHighlightSet(SectionId, DishId, bool),
    DishTagToggled(SectionId, DishId, String),
    DishPhotoPick(SectionId, DishId),
    DishPhotoClear(SectionId, DishId),

    // Theme
    PresetApplied(ThemeKind),
    TextColorAdjusted(String),

    // Generative triggers
    GenerateMenu,
    EnhanceDish(SectionId, DishId),
    GenerateTheme {
        prompt: String,
        colors: String,
        fonts: String,
    },

    // Generative completions (sent from worker threads)
    MenuGenerated(Result<MenuOutline, String>),
    DescriptionEnhanced(SectionId, DishId, String),
    ThemeGenerated {
        prompt: String,
        theme: GeneratedTheme,
    },

    // Share & export
    QrRefresh,
    QrPreviewFetched(Result<Vec<u8>, String>),
    QrDownload,
    QrDownloadFetched(Result<Vec<u8>, String>),
    ExportPrintPreview,

    // View & app
    RefreshPreview,
    ToggleLivePreview,
    SetApiKey,
    ShowAbout,
    Quit,
}
