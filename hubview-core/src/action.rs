/// Every user interaction produces an Action. UI never directly calls the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Form
    Submit,
    Refetch,
    Quit,

    // Path input
    InputPush(char),
    InputPop,
    InputDeleteForward,
    InputDeleteWord,
    InputDeleteToStart,

    // Cursor movement (for path input)
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,

    // Issue list
    MoveSelection(i32),
    MoveTop,
    MoveBottom,
    OpenIssue,

    // UI
    ShowHelp,
    CloseOverlay,
}
