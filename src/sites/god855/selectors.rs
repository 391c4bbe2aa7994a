pub struct God855Selectors;

impl God855Selectors {
    // Login
    pub const LOGIN_CONTAINER: &'static str = "div.flex.relative.items-center";
    pub const LOGIN_BUTTON: &'static str = "button.topbar_btn_1";
    pub const LOGIN_BUTTON_TEXT: &'static str = "เข้าสู่ระบบ";
    pub const USERNAME_TEXTBOX: &'static str = "ใส่หมายเลขโทรศัพท์";
    pub const PASSWORD_TEXTBOX: &'static str = "รหัสผ่าน / PIN 6 หลัก";
    pub const LOGIN_SUBMIT: &'static str = "button.new-reg-buttons";
    pub const POST_LOGIN_CLOSE: &'static str = "ปิด";
    pub const DEPOSIT_BUTTON_TEXT: &'static str = "เติมเงิน";

    // Deposit page
    pub const METHOD_BUTTONS: &'static str = ".deposit-method-container button";
    pub const CHANNEL_BUTTONS: &'static str = ".deposit-channel-container button";
    pub const AMOUNT_RANGE: &'static str = "div.deposit_channel_text.flex.justify-between";
    pub const AMOUNT_PLACEHOLDER: &'static str = "0";
    // The page renders "เติมเงิน" three times; the confirmation is the third.
    pub const SUBMIT_NTH: usize = 2;
}
