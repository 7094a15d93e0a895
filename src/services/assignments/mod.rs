pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::classroom::ClassroomApi;
use crate::classroom::oauth::GoogleOAuthProvider;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_classroom(&self, request: &HttpRequest) -> Arc<dyn ClassroomApi> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ClassroomApi>>>()
            .expect("Classroom client not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_provider(&self, request: &HttpRequest) -> Arc<GoogleOAuthProvider> {
        request
            .app_data::<actix_web::web::Data<Arc<GoogleOAuthProvider>>>()
            .expect("OAuth provider not found in app data")
            .get_ref()
            .clone()
    }

    // 聚合当前用户的全部作业
    pub async fn list_assignments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_list_assignments(self, request).await
    }
}
