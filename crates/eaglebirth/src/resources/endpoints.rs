//! Endpoint table of the EagleBirth API
//!
//! Every path is relative to the client's base URL.

use super::Endpoint;

/// Send an email
pub const SEND_EMAIL: Endpoint = Endpoint::post("/app/messaging/email/");
/// Send an SMS
pub const SEND_SMS: Endpoint = Endpoint::post("/app/messaging/sms/");
/// SMS pricing
pub const SMS_PRICES: Endpoint = Endpoint::post("/app/messaging/sms/get_prices_for_sms/");
/// Send a WhatsApp message
pub const SEND_WHATSAPP: Endpoint = Endpoint::post("/app/messaging/whatsapp/");

/// Send a one-time code
pub const SEND_OTP: Endpoint = Endpoint::post("/app/code_validation/");
/// Validate a one-time code
pub const VALIDATE_OTP: Endpoint = Endpoint::post("/app/code_validation/validate_code_sent/");
/// Check whether a code was validated
pub const CHECK_VALIDATED_OTP: Endpoint =
    Endpoint::post("/app/code_validation/check_validated_code/");

/// Generate a QR code
pub const GENERATE_QR: Endpoint = Endpoint::post("/app/qr_code_generator/");

/// Face details from one image
pub const FACE_DETAILS: Endpoint =
    Endpoint::post("/app/image_processing/get_details_from_an_image/");
/// Compare faces across two images
pub const COMPARE_FACES: Endpoint =
    Endpoint::post("/app/image_processing/compare_two_faces_in_two_images/");
/// Text from an image (OCR)
pub const EXTRACT_TEXT: Endpoint = Endpoint::post("/app/image_processing/get_text_from_image/");

/// Create a directory
pub const CREATE_DIRECTORY: Endpoint = Endpoint::post("/app/storage/directory/");
/// Delete a directory
pub const DELETE_DIRECTORY: Endpoint =
    Endpoint::post("/app/storage/directory/delete_a_directory/");
/// List a directory by path
pub const LIST_DIRECTORY: Endpoint =
    Endpoint::post("/app/storage/directory/list_directory_content/");
/// List a directory by id
pub const LIST_DIRECTORY_BY_ID: Endpoint =
    Endpoint::post("/app/storage/directory/list_directory_content_from_id/");
/// Change a directory password
pub const UPDATE_DIRECTORY_PASSWORD: Endpoint =
    Endpoint::post("/app/storage/directory/update_directory_password/");
/// Change directory privacy
pub const UPDATE_DIRECTORY_PRIVACY: Endpoint =
    Endpoint::post("/app/storage/directory/update_directory_privacy/");

/// Upload a file (multipart)
pub const UPLOAD_FILE: Endpoint = Endpoint::post("/app/storage/file/");
/// File content by id
pub const FILE_CONTENT_BY_ID: Endpoint = Endpoint::post("/app/storage/file/content_from_id/");
/// File content by path
pub const FILE_CONTENT: Endpoint = Endpoint::get("/app/storage/file/content/");
/// Delete a file
pub const DELETE_FILE: Endpoint = Endpoint::post("/app/storage/file/delete_a_file/");
/// Change a file password
pub const UPDATE_FILE_PASSWORD: Endpoint =
    Endpoint::post("/app/storage/file/update_file_password/");
/// Change file privacy
pub const UPDATE_FILE_PRIVACY: Endpoint =
    Endpoint::post("/app/storage/file/update_file_privacy/");

/// Create an app user
pub const CREATE_USER: Endpoint = Endpoint::post("/app/users/");
/// Get one app user
pub const GET_USER: Endpoint = Endpoint::post("/app/users/get_app_user/");
/// List app users
pub const LIST_USERS: Endpoint = Endpoint::post("/app/users/get_app_users/");
/// Update an app user
pub const UPDATE_USER: Endpoint = Endpoint::post("/app/users/update_app_user/");
/// Delete an app user
pub const DELETE_USER: Endpoint = Endpoint::post("/app/users/delete_app_user/");
/// Check that an app user exists
pub const USER_EXISTS: Endpoint = Endpoint::post("/app/users/check_if_app_user_exists/");
/// Sign a user in, also used for the PKCE code exchange
pub const SIGN_IN: Endpoint = Endpoint::post("/app/users/sign_app_user_in/");
/// Sign a user out
pub const SIGN_OUT: Endpoint = Endpoint::post("/app/users/sign_app_user_out/");
/// Refresh a session token
pub const REFRESH_TOKEN: Endpoint = Endpoint::post("/app/users/refresh_signin_token/");
/// Verify a session token
pub const VERIFY_TOKEN: Endpoint = Endpoint::post("/app/users/verify_signin_token/");
/// Admin password change
pub const UPDATE_USER_PASSWORD: Endpoint =
    Endpoint::post("/app/users/update_app_user_password/");
/// Self-service password reset
pub const RESET_PASSWORD: Endpoint = Endpoint::post("/app/users/reset_password_for_app_user/");
/// Change user status
pub const UPDATE_USER_STATUS: Endpoint = Endpoint::post("/app/users/update_app_user_status/");
/// Change user type
pub const UPDATE_USER_TYPE: Endpoint = Endpoint::post("/app/users/update_app_user_type/");
/// Reactivate a user
pub const REACTIVATE_USER: Endpoint = Endpoint::post("/app/users/reactivate_app_user/");
/// Email a verification code
pub const SEND_VERIFICATION_CODE: Endpoint =
    Endpoint::post("/app/users/send_code_via_email_to_app_user/");
/// Validate an emailed verification code
pub const VALIDATE_VERIFICATION_CODE: Endpoint =
    Endpoint::post("/app/users/validate_code_via_email_for_app_user/");
