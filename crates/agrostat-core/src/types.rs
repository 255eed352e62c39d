/// Core result from model fitting - always computed
#[derive(Debug, Clone)]
pub struct FitResultCore {
    /// Regression coefficients, intercept first when one was fitted
    pub coefficients: Vec<f64>,
    /// Intercept term (if fitted with intercept)
    pub intercept: Option<f64>,
    /// R-squared (coefficient of determination)
    pub r_squared: f64,
    /// Adjusted R-squared
    pub adj_r_squared: f64,
    /// Residual standard error
    pub residual_std_error: f64,
    /// Residual sum of squares
    pub ssr: f64,
    /// Model degrees of freedom (features, excluding intercept)
    pub df_model: usize,
    /// Residual degrees of freedom (observations minus parameters)
    pub df_resid: usize,
    /// Number of observations used
    pub n_observations: usize,
    /// Number of features (excluding intercept)
    pub n_features: usize,
    /// Residuals of the used observations, in input order
    pub residuals: Vec<f64>,
}

/// Inference results - only computed if requested
#[derive(Debug, Clone)]
pub struct FitResultInference {
    /// Standard errors of coefficients
    pub std_errors: Vec<f64>,
    /// t-statistics for coefficients
    pub t_values: Vec<f64>,
    /// p-values for coefficients
    pub p_values: Vec<f64>,
    /// Lower bound of confidence intervals
    pub ci_lower: Vec<f64>,
    /// Upper bound of confidence intervals
    pub ci_upper: Vec<f64>,
    /// Confidence level used (e.g., 0.95)
    pub confidence_level: f64,
    /// F-statistic for overall model significance
    pub f_statistic: f64,
    /// p-value for F-statistic
    pub f_pvalue: f64,
}

/// Residual and model-selection diagnostics
#[derive(Debug, Clone)]
pub struct FitResultDiagnostics {
    /// Gaussian log-likelihood
    pub log_likelihood: f64,
    /// AIC (Akaike Information Criterion)
    pub aic: f64,
    /// BIC (Bayesian Information Criterion)
    pub bic: f64,
    /// D'Agostino-Pearson omnibus statistic of the residuals
    pub omnibus: f64,
    /// p-value of the omnibus statistic
    pub omnibus_pvalue: f64,
    /// Residual skewness
    pub skew: f64,
    /// Residual kurtosis (Pearson, 3 for a normal distribution)
    pub kurtosis: f64,
    /// Durbin-Watson statistic
    pub durbin_watson: f64,
    /// Jarque-Bera statistic
    pub jarque_bera: f64,
    /// p-value of the Jarque-Bera statistic
    pub jarque_bera_pvalue: f64,
    /// Condition number of the design matrix
    pub condition_number: f64,
}

/// Combined fit result
#[derive(Debug, Clone)]
pub struct FitResult {
    pub core: FitResultCore,
    pub inference: Option<FitResultInference>,
    pub diagnostics: FitResultDiagnostics,
}

/// Options for OLS fitting
#[derive(Debug, Clone)]
pub struct OlsOptions {
    /// Whether to fit an intercept term
    pub fit_intercept: bool,
    /// Whether to compute inference statistics (std errors, p-values, etc.)
    pub compute_inference: bool,
    /// Confidence level for confidence intervals (default: 0.95)
    pub confidence_level: f64,
}

impl Default for OlsOptions {
    fn default() -> Self {
        Self {
            fit_intercept: true,
            compute_inference: true,
            confidence_level: 0.95,
        }
    }
}
