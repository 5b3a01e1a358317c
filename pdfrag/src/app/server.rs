/// OpenAPI document.
pub mod api;

/// HTTP specific DTOs.
pub mod dto;

/// Routes and handlers.
pub mod router;
