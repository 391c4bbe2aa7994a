pub struct Siam212Selectors;

impl Siam212Selectors {
    // Login
    pub const AD_CHECKBOX: &'static str = ".o-checkbox";
    pub const AD_CLOSE_ICON: &'static str = ".icon-close.text-lg";
    pub const LOGIN_CONTAINER: &'static str = "div.flex.relative.items-center";
    pub const LOGIN_BUTTON: &'static str = "button.topbar_btn_1";
    pub const LOGIN_BUTTON_TEXT: &'static str = "Login";
    pub const USERNAME_TEXTBOX: &'static str = "09xxxxxxx";
    pub const LOGIN_SUBMIT: &'static str = "button.new-reg-buttons";
    pub const OTP_TEXTBOX: &'static str = "One-time password";
    pub const WALLET_CONTAINER: &'static str = "div.wallet-container-desktop";
    pub const DEPOSIT_TOPBAR: &'static str = "button.topbar_btn_2";

    // Deposit page
    pub const METHOD_BUTTONS: &'static str = ".deposit-button-method";
    pub const CHANNEL_BUTTONS: &'static str = ".deposit-channel-container button";
    pub const AMOUNT_RANGE: &'static str = "div.deposit_channel_text.flex.justify-between";
    pub const AMOUNT_PLACEHOLDER: &'static str = "0";
    pub const SUBMIT_BUTTON: &'static str = ".btn_deposits";
}
