//! Sequence regression model.

use candle_core::Tensor;
use candle_nn::rnn::{lstm, LSTMConfig, LSTMState, LSTM, RNN};
use candle_nn::{linear, Linear, Module, VarBuilder};

use crate::error::{Result, TrainError};

/// Model dimensions.
#[derive(Debug, Clone, Copy)]
pub struct DepthLstmConfig {
    pub input_dim: usize,
    pub hidden_dim: usize,
    pub output_dim: usize,
}

/// Single-layer LSTM over the time axis followed by a per-step linear
/// projection from the hidden state to the output channels.
pub struct DepthLstm {
    lstm: LSTM,
    proj: Linear,
}

impl DepthLstm {
    pub fn new(config: DepthLstmConfig, vb: VarBuilder) -> Result<Self> {
        let lstm = lstm(
            config.input_dim,
            config.hidden_dim,
            LSTMConfig::default(),
            vb.pp("lstm"),
        )?;
        let proj = linear(config.hidden_dim, config.output_dim, vb.pp("proj"))?;
        Ok(Self { lstm, proj })
    }

    /// Zero recurrent state for a batch.
    pub fn zero_state(&self, batch: usize) -> Result<LSTMState> {
        Ok(self.lstm.zero_state(batch)?)
    }

    /// Run a (batch, time, input) tensor through the recurrence starting
    /// from `state`.
    ///
    /// # Returns
    ///
    /// The (batch, time, output) predictions and the recurrent state after
    /// the last step, for the caller to carry into the next call.
    pub fn forward(&self, input: &Tensor, state: &LSTMState) -> Result<(Tensor, LSTMState)> {
        let (_batch, steps, _channels) = input.dims3()?;
        if steps == 0 {
            return Err(TrainError::Shape(
                "input has no time steps to run the recurrence over".to_string(),
            ));
        }

        let states = self.lstm.seq_init(input, state)?;
        let last = states
            .last()
            .cloned()
            .ok_or_else(|| TrainError::Shape("recurrence produced no states".to_string()))?;

        // Stack the per-step hidden states into (batch, time, hidden) and
        // project each step to the output width.
        let hidden: Vec<Tensor> = states.iter().map(|s| s.h().clone()).collect();
        let stacked = Tensor::stack(&hidden, 1)?;
        let predictions = self.proj.forward(&stacked)?;

        Ok((predictions, last))
    }
}

/// The same state values cut loose from their computation graph, so carried
/// state never backpropagates into an earlier minibatch.
pub fn detach_state(state: &LSTMState) -> LSTMState {
    LSTMState {
        h: state.h().detach(),
        c: state.c().detach(),
    }
}

/// The first `batch` rows of a state, for a final minibatch smaller than
/// the carried batch dimension.
pub fn narrow_state(state: &LSTMState, batch: usize) -> Result<LSTMState> {
    Ok(LSTMState {
        h: state.h().narrow(0, 0, batch)?,
        c: state.c().narrow(0, 0, batch)?,
    })
}
