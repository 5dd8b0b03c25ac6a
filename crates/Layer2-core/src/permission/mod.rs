//! Authorization - 역할/계층/위임 기반 권한 검사
//!
//! - `action`: 액션 이름 (`CREATE_ZONE`, `viewFamilies` ...)
//! - `context`: 검사 대상 (target / parent / believer)
//! - `policy`: 정책 테이블 + `has_permission`
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use parish_core::permission::{has_permission, Action, PermissionContext};
//!
//! let ctx = PermissionContext::on(parish);
//! if has_permission(Some(&user), Action::CreateZone, &ctx) {
//!     // 구역 생성
//! }
//! ```
//!
//! 위임 권한(`acting_permissions`)은 직접 관리와 OR로만 더해지며 대체하지 않는다.

mod action;
mod context;
mod policy;

pub use action::Action;
pub use context::{PermissionContext, Target};
pub use policy::{has_permission, has_permission_named, Rule, Subjects, RULES};
