//! # Typed Service Wrappers
//!
//! The [`service!`](crate::service!) macro declares a struct bound to one remote service.
//! Every method becomes an `async fn` that forwards to [`RpcClient::call_typed`] with the
//! bound service name and the method's wire name.
//!
//! ```rust
//! use turborpc_core::service;
//!
//! service! {
//!     /// Client for the `Echo` service.
//!     pub struct Echo = "Echo" {
//!         fn say(String) -> String = "Say";
//!         fn ping() -> () = "Ping";
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let echo = Echo::new();
//! let endpoint = turborpc_core::Endpoint::parse("http://localhost:5000/rpc")?;
//!
//! let reply: Result<String, _> = echo.say(&endpoint, "hello".to_string()).await?;
//! echo.ping(&endpoint).await??;
//! # Ok(())
//! # }
//! ```
//!
//! Methods declared without an input send JSON `null`. Outputs are checked by deserializing
//! them into the declared type; a mismatch is a [`CallError::UnexpectedOutput`].
//!
//! [`RpcClient::call_typed`]: crate::RpcClient::call_typed
//! [`CallError::UnexpectedOutput`]: crate::CallError::UnexpectedOutput

#[macro_export]
macro_rules! service {
    (@input) => {
        ()
    };

    (@input $arg:ident $ty:ty) => {
        $arg
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident = $service:literal {
            $(
                $(#[$method_meta:meta])*
                fn $fn_name:ident($($input:ty)?) -> $output:ty = $method:literal;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name<T = $crate::transport::HttpTransport> {
            client: $crate::client::RpcClient<T>,
        }

        impl $name<$crate::transport::HttpTransport> {
            /// Creates a wrapper using the default HTTP transport.
            pub fn new() -> Self {
                Self::from_client($crate::client::RpcClient::new())
            }
        }

        impl ::std::default::Default for $name<$crate::transport::HttpTransport> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T> $name<T>
        where
            T: $crate::transport::Transport,
        {
            /// The remote service name every method of this wrapper is bound to.
            pub const SERVICE: &'static str = $service;

            pub fn from_client(client: $crate::client::RpcClient<T>) -> Self {
                Self { client }
            }

            $(
                $(#[$method_meta])*
                pub async fn $fn_name(
                    &self,
                    endpoint: &$crate::client::Endpoint
                    $(, input: $input)?
                ) -> ::std::result::Result<
                    ::std::result::Result<$output, $crate::error::RpcError>,
                    $crate::error::CallError,
                > {
                    self.client
                        .call_typed(
                            endpoint,
                            $crate::client::CallTarget::new($service, $method),
                            &$crate::service!(@input $(input $input)?),
                        )
                        .await
                }
            )*
        }
    };
}
