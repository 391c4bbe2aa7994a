pub struct Nex855Selectors;

impl Nex855Selectors {
    // Login
    pub const AGE_GATE_YES: &'static str = "ใช่";
    pub const LOGIN_BUTTON_TEXT: &'static str = "Login";
    pub const USERNAME_TEXTBOX: &'static str = "Enter phone number";
    pub const PASSWORD_TEXTBOX: &'static str = "Password / 6 Digits Pin";
    pub const DEPOSIT_BUTTON_TEXT: &'static str = "Deposit";

    // Deposit page
    pub const METHOD_BUTTONS: &'static str = ".deposit-method-container button";
    pub const CHANNEL_BUTTONS: &'static str = ".deposit-channel-container button";
    pub const AMOUNT_RANGE: &'static str = "div.deposit_channel_text.flex.justify-between";
    pub const AMOUNT_PLACEHOLDER: &'static str = "0";
    // "Deposit" appears in the topbar too; the confirmation is the second.
    pub const SUBMIT_NTH: usize = 1;
}
