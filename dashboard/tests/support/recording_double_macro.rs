//! Declarative macro for recording doubles of single-method driven ports.

macro_rules! recording_double {
    (
        $(#[$enum_meta:meta])*
        $enum_vis:vis enum $response_enum:ident {
            $ok_variant:ident($ok_type:ty),
            $err_variant:ident($err_type:ty) $(,)?
        }

        $(#[$struct_meta:meta])*
        $struct_vis:vis struct $struct_name:ident {
            calls: $call_type:ty,
            trait: $trait_name:path,
            method: $method_name:ident ( &self $(, $arg_name:ident : $arg_ty:ty )* )
                -> Result<$method_ok:ty, $method_err:ty>,
            record: $record_expr:expr $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone)]
        $enum_vis enum $response_enum {
            $ok_variant($ok_type),
            $err_variant($err_type),
        }

        $(#[$struct_meta])*
        #[derive(Clone)]
        $struct_vis struct $struct_name {
            calls: std::sync::Arc<std::sync::Mutex<Vec<$call_type>>>,
            response: std::sync::Arc<std::sync::Mutex<$response_enum>>,
        }

        impl $struct_name {
            $struct_vis fn new(response: $response_enum) -> Self {
                Self {
                    calls: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
                    response: std::sync::Arc::new(std::sync::Mutex::new(response)),
                }
            }

            $struct_vis fn calls(&self) -> Vec<$call_type> {
                self.calls.lock().expect("calls lock").clone()
            }

            $struct_vis fn set_response(&self, response: $response_enum) {
                *self.response.lock().expect("response lock") = response;
            }
        }

        #[async_trait::async_trait]
        impl $trait_name for $struct_name {
            async fn $method_name(
                &self $(, $arg_name: $arg_ty )*
            ) -> Result<$method_ok, $method_err> {
                self.calls.lock().expect("calls lock").push($record_expr);
                match self.response.lock().expect("response lock").clone() {
                    $response_enum::$ok_variant(response) => Ok(response),
                    $response_enum::$err_variant(error) => Err(error),
                }
            }
        }
    };
}

pub(crate) use recording_double;
