// FICHIER : src-core/src/utils/macros.rs

/// Affiche une info à l'utilisateur et logue l'événement
#[macro_export]
macro_rules! user_info {
    ($key:expr, $($arg:tt)*) => {{
        let full_msg = format!($($arg)*);
        println!("{}", full_msg);
        tracing::info!(event = "user_notification", key = $key, message = %full_msg);
    }};
}

/// Affiche un succès à l'utilisateur
#[macro_export]
macro_rules! user_success {
    ($key:expr, $($arg:tt)*) => {{
        let full_msg = format!($($arg)*);
        println!("✅ {}", full_msg);
        tracing::info!(event = "user_success", key = $key, message = %full_msg);
    }};
}

/// Affiche une erreur à l'utilisateur ET logue la structure technique enrichie
#[macro_export]
macro_rules! user_error {
    // Format enrichi : composant + action
    (
        $key:expr,
        error = $err:expr,
        component = $comp:expr,
        action = $action:expr
    ) => {{
        eprintln!("❌ [{}] {} : {}", $comp, $key, $err);
        tracing::error!(
            service = "multinet", componentName = $comp, action = $action,
            error = ?$err, event = "user_error", key = $key
        );
    }};

    // Clé + Arguments de formatage
    // (Doit toujours être placé à la fin pour ne pas intercepter la syntaxe du dessus)
    ($key:expr, $($arg:tt)*) => {{
        let full_msg = format!($($arg)*);
        eprintln!("❌ {}", full_msg);
        tracing::error!(event = "user_error", key = $key, message = %full_msg);
    }};
}
