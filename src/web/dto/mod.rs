//! Data transfer objects for the Web API.

mod request;
mod response;

pub use request::{
    CreateDirectoryRequest, LoginRequest, LogoutRequest, PathQuery, PublishPageRequest,
    RefreshRequest, RegisterRequest, RenameRequest, ShareRequest, UpdatePageRequest,
};
pub use response::{
    ApiResponse, LoginResponse, MeResponse, NodeResponse, PageResponse, RefreshResponse,
    SharedFileResponse, ShareResponse, UserInfo,
};
